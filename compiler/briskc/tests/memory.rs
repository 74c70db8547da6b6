//! Heap accounting across script runs.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use briskc::{Output, Vm, VmConfig};
use pretty_assertions::assert_eq;

fn uncached_vm() -> Vm {
    Vm::with_config(
        &VmConfig::new()
            .output(Output::Silent)
            .cache_literals(false),
    )
}

#[test]
fn temporaries_are_released() {
    let mut vm = uncached_vm();
    vm.run_script(
        "defs.bk",
        "\
fn churn(n)
  parts = []
  for i = 0 to n do
    append(parts, \"item \" + str(i))
  end
  joined = \"\"
  for i = 0 to len(parts) do joined = joined + parts / i
  return len(joined)
end",
    )
    .unwrap();

    let baseline = vm.mem_allocated();
    let live = vm.heap().live_allocations();
    for _ in 0..3 {
        vm.run_script("run.bk", "churn(50)\nnull").unwrap();
        assert_eq!(vm.mem_allocated(), baseline);
        assert_eq!(vm.heap().live_allocations(), live);
    }
}

#[test]
fn rebinding_a_global_frees_the_old_value() {
    let mut vm = uncached_vm();
    vm.run_script("a.bk", "data = null").unwrap();
    let baseline = vm.mem_allocated();

    vm.run_script("b.bk", "data = [\"a long enough string\", [1, 2, 3]]\nnull")
        .unwrap();
    assert!(vm.mem_allocated() > baseline);

    vm.run_script("c.bk", "data = null").unwrap();
    assert_eq!(vm.mem_allocated(), baseline);
}

#[test]
fn blocks_are_reused() {
    let mut vm = uncached_vm();
    vm.run_script("warm.bk", "for i = 0 to 100 do str(i)\nnull")
        .unwrap();
    let blocks = vm.heap().block_count();
    vm.run_script("again.bk", "for i = 0 to 100 do str(i)\nnull")
        .unwrap();
    assert_eq!(vm.heap().block_count(), blocks);
    assert!(vm.heap().reused_blocks() > 0);
}

#[test]
fn local_function_definitions_are_released() {
    let mut vm = uncached_vm();
    vm.run_script(
        "defs.bk",
        "\
fn outer(n)
  fn helper(x) -> x * 2
  square = fn(x) -> x * x
  return helper(n) + square(n)
end",
    )
    .unwrap();

    let baseline = vm.mem_allocated();
    let live = vm.heap().live_allocations();
    for _ in 0..10 {
        vm.run_script("run.bk", "outer(3)\nnull").unwrap();
    }
    assert_eq!(vm.mem_allocated(), baseline);
    assert_eq!(vm.heap().live_allocations(), live);
}

#[test]
fn instances_with_methods_are_released() {
    let mut vm = uncached_vm();
    vm.run_script(
        "defs.bk",
        "\
object Acct(balance)
  fn get() -> balance
end
a = null",
    )
    .unwrap();

    let baseline = vm.mem_allocated();
    let live = vm.heap().live_allocations();
    vm.run_script("use.bk", "a = new Acct(5)\na.get()").unwrap();
    assert!(vm.heap().live_allocations() > live);

    vm.run_script("drop.bk", "a = null").unwrap();
    assert_eq!(vm.mem_allocated(), baseline);
    assert_eq!(vm.heap().live_allocations(), live);
}

#[test]
fn returned_closures_keep_their_context() {
    let mut vm = uncached_vm();
    vm.run_script(
        "defs.bk",
        "\
fn counter(start)
  fn next() -> start + 1
  return next
end
c = counter(41)",
    )
    .unwrap();
    assert_eq!(vm.run_script("call.bk", "c()").unwrap().as_int(), Some(42));
}
