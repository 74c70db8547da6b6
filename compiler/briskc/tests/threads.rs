//! Independent sessions on separate threads.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::Arc;
use std::thread;

use briskc::{Output, Value, Vm, VmConfig};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

const SCRIPT: &str = "\
fn tri(n)
  total = 0
  for i = 1 to n + 1 do total = total + i
  return total
end
tri(limit)";

#[test]
fn one_vm_per_thread() {
    let totals = Arc::new(Mutex::new(Vec::new()));
    let handles: Vec<_> = (1..=4i64)
        .map(|worker| {
            let totals = Arc::clone(&totals);
            thread::spawn(move || {
                let mut vm = Vm::with_config(&VmConfig::new().output(Output::Silent));
                vm.set_global("limit", Value::Int(worker * 10));
                let value = vm.run_script("worker.bk", SCRIPT).unwrap();
                totals.lock().push((worker, value.as_int().unwrap()));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut totals = totals.lock().clone();
    totals.sort_unstable();
    assert_eq!(totals, vec![(1, 55), (2, 210), (3, 465), (4, 820)]);
}

#[test]
fn sessions_do_not_share_globals() {
    let mut first = Vm::with_config(&VmConfig::new().output(Output::Silent));
    let mut second = Vm::with_config(&VmConfig::new().output(Output::Silent));
    first.run_script("a.bk", "shared = 1").unwrap();
    assert!(second.run_script("b.bk", "shared").is_err());
    assert_eq!(first.run_script("a.bk", "shared").unwrap(), Value::Int(1));
}

#[test]
fn tracing_can_be_initialized_twice() {
    briskc::init_tracing();
    briskc::init_tracing();
}
