use super::*;
use brisk_ir::{pretty, BinaryOp, ExprKind, ScopeSel, StringInterner, UnaryOp};
use pretty_assertions::assert_eq;

fn parse_source(source: &str) -> (Result<Program, ParseError>, StringInterner) {
    let interner = StringInterner::new();
    let lexed = brisk_lexer::tokenize(source, &interner);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    (parse(&lexed.tokens), interner)
}

fn parse_ok(source: &str) -> (Program, StringInterner) {
    let (result, interner) = parse_source(source);
    match result {
        Ok(program) => (program, interner),
        Err(err) => panic!("parse failed for {source:?}: {err}"),
    }
}

fn parse_err(source: &str) -> ParseError {
    match parse_source(source).0 {
        Ok(_) => panic!("expected a parse error for {source:?}"),
        Err(err) => err,
    }
}

/// Top-level statements of a program.
fn statements(program: &Program) -> Vec<ExprId> {
    match program.arena.get_expr(program.root).kind {
        ExprKind::Block(range) => program.arena.get_expr_list(range).to_vec(),
        other => panic!("root is not a block: {other:?}"),
    }
}

fn only_statement(program: &Program) -> ExprKind {
    let stmts = statements(program);
    assert_eq!(stmts.len(), 1, "expected exactly one statement");
    program.arena.get_expr(stmts[0]).kind
}

#[test]
fn test_precedence_mul_binds_tighter_than_add() {
    let (program, _) = parse_ok("1 + 2 * 3");
    let ExprKind::Binary { op, left, right } = only_statement(&program) else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(program.arena.get_expr(left).kind, ExprKind::Int(1));
    assert!(matches!(
        program.arena.get_expr(right).kind,
        ExprKind::Binary { op: BinaryOp::Mul, .. }
    ));
}

#[test]
fn test_subtraction_is_left_associative() {
    let (program, _) = parse_ok("10 - 4 - 3");
    let ExprKind::Binary { op, left, right } = only_statement(&program) else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(program.arena.get_expr(right).kind, ExprKind::Int(3));
    assert!(matches!(
        program.arena.get_expr(left).kind,
        ExprKind::Binary { op: BinaryOp::Sub, .. }
    ));
}

#[test]
fn test_unary_and_power() {
    let (program, _) = parse_ok("-2 ^ 2");
    let ExprKind::Unary { op, operand } = only_statement(&program) else {
        panic!("expected unary");
    };
    assert_eq!(op, UnaryOp::Neg);
    assert!(matches!(
        program.arena.get_expr(operand).kind,
        ExprKind::Binary { op: BinaryOp::Pow, .. }
    ));
}

#[test]
fn test_logical_operators_bind_loosest() {
    let (program, _) = parse_ok("a < 1 || !b && c == 2");
    let ExprKind::Binary { op, right, .. } = only_statement(&program) else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Or);
    let ExprKind::Binary { op, left, .. } = program.arena.get_expr(right).kind else {
        panic!("expected &&");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(
        program.arena.get_expr(left).kind,
        ExprKind::Unary { op: UnaryOp::Not, .. }
    ));
}

#[test]
fn test_binary_span_is_union_of_operands() {
    let (program, _) = parse_ok("  12 + x");
    let stmt = statements(&program)[0];
    assert_eq!(program.arena.get_expr(stmt).span, Span::new(2, 8));
}

#[test]
fn test_assignment_vs_expression_share_prefix() {
    let (program, interner) = parse_ok("x = 1\nx + 1\nx == 1");
    let stmts = statements(&program);
    assert_eq!(stmts.len(), 3);
    assert!(matches!(
        program.arena.get_expr(stmts[0]).kind,
        ExprKind::Assign { name, .. } if interner.lookup(name) == "x"
    ));
    assert!(matches!(
        program.arena.get_expr(stmts[1]).kind,
        ExprKind::Binary { op: BinaryOp::Add, .. }
    ));
    assert!(matches!(
        program.arena.get_expr(stmts[2]).kind,
        ExprKind::Binary { op: BinaryOp::Eq, .. }
    ));
}

#[test]
fn test_chained_assignment() {
    let (program, _) = parse_ok("a = b = 3");
    let ExprKind::Assign { value, .. } = only_statement(&program) else {
        panic!("expected assignment");
    };
    assert!(matches!(
        program.arena.get_expr(value).kind,
        ExprKind::Assign { .. }
    ));
}

#[test]
fn test_member_assignment_and_outer() {
    let (program, interner) = parse_ok("point.x = 3\nouter.count = outer.count + 1");
    let stmts = statements(&program);
    let ExprKind::ScopeAssign { target, member, .. } = program.arena.get_expr(stmts[0]).kind else {
        panic!("expected scope assignment");
    };
    assert_eq!(interner.lookup(member), "x");
    let ScopeSel::Value(obj) = target else {
        panic!("expected value target");
    };
    assert!(matches!(program.arena.get_expr(obj).kind, ExprKind::Ident(_)));

    let ExprKind::ScopeAssign { target, value, .. } = program.arena.get_expr(stmts[1]).kind else {
        panic!("expected scope assignment");
    };
    assert_eq!(target, ScopeSel::Outer);
    assert!(matches!(
        program.arena.get_expr(value).kind,
        ExprKind::Binary { op: BinaryOp::Add, .. }
    ));
}

#[test]
fn test_call_and_member_chain() {
    let (program, _) = parse_ok("counter.step(1, 2)(3)");
    let ExprKind::Call { callee, args } = only_statement(&program) else {
        panic!("expected call");
    };
    assert_eq!(args.len, 1);
    let ExprKind::Call { callee, args } = program.arena.get_expr(callee).kind else {
        panic!("expected inner call");
    };
    assert_eq!(args.len, 2);
    assert!(matches!(
        program.arena.get_expr(callee).kind,
        ExprKind::ScopeAccess { .. }
    ));
}

#[test]
fn test_auto_return_function() {
    let (program, interner) = parse_ok("fn add(a, b) -> a + b");
    let ExprKind::FuncDef {
        name,
        params,
        auto_return,
        ..
    } = only_statement(&program)
    else {
        panic!("expected fn");
    };
    assert_eq!(name.map(|n| interner.lookup(n)), Some("add"));
    let names: Vec<_> = program
        .arena
        .get_params(params)
        .iter()
        .map(|&n| interner.lookup(n))
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(auto_return);
}

#[test]
fn test_block_function() {
    let (program, _) = parse_ok("fn f()\n  x = 1\n  return x\nend\nf()");
    let stmts = statements(&program);
    assert_eq!(stmts.len(), 2);
    let ExprKind::FuncDef {
        name,
        body,
        auto_return,
        ..
    } = program.arena.get_expr(stmts[0]).kind
    else {
        panic!("expected fn");
    };
    assert!(name.is_some());
    assert!(!auto_return);
    let ExprKind::Block(range) = program.arena.get_expr(body).kind else {
        panic!("expected block body");
    };
    let body = program.arena.get_expr_list(range);
    assert!(matches!(
        program.arena.get_expr(body[1]).kind,
        ExprKind::Return(Some(_))
    ));
}

#[test]
fn test_anonymous_function_value() {
    let (program, _) = parse_ok("f = fn() -> 1");
    let ExprKind::Assign { value, .. } = only_statement(&program) else {
        panic!("expected assignment");
    };
    assert!(matches!(
        program.arena.get_expr(value).kind,
        ExprKind::FuncDef { name: None, .. }
    ));
}

#[test]
fn test_bare_return() {
    let (program, _) = parse_ok("fn f()\n  return\nend");
    let ExprKind::FuncDef { body, .. } = only_statement(&program) else {
        panic!("expected fn");
    };
    let ExprKind::Block(range) = program.arena.get_expr(body).kind else {
        panic!("expected block");
    };
    let first = program.arena.get_expr_list(range)[0];
    assert_eq!(program.arena.get_expr(first).kind, ExprKind::Return(None));
}

#[test]
fn test_inline_if_elif_else() {
    let (program, _) = parse_ok("if x then 1 elif y then 2 else 3");
    let ExprKind::If {
        branches,
        else_branch,
        inline,
    } = only_statement(&program)
    else {
        panic!("expected if");
    };
    assert!(inline);
    assert_eq!(program.arena.get_branches(branches).len(), 2);
    assert!(else_branch.is_some());
}

#[test]
fn test_block_if() {
    let source = "if x then\n  a = 1\nelif y then\n  a = 2\nelse\n  a = 3\nend";
    let (program, _) = parse_ok(source);
    let ExprKind::If {
        branches,
        else_branch,
        inline,
    } = only_statement(&program)
    else {
        panic!("expected if");
    };
    assert!(!inline);
    assert_eq!(program.arena.get_branches(branches).len(), 2);
    let else_body = else_branch.map(|id| program.arena.get_expr(id).kind);
    assert!(matches!(else_body, Some(ExprKind::Block(_))));
}

#[test]
fn test_for_with_step_and_while() {
    let (program, _) = parse_ok("for i = 0 to 10 step 2 do\n  x = i\nend\nwhile x > 0 do x = x - 1");
    let stmts = statements(&program);
    assert!(matches!(
        program.arena.get_expr(stmts[0]).kind,
        ExprKind::For {
            step: Some(_),
            inline: false,
            ..
        }
    ));
    assert!(matches!(
        program.arena.get_expr(stmts[1]).kind,
        ExprKind::While { inline: true, .. }
    ));
}

#[test]
fn test_break_and_continue_statements() {
    let (program, _) = parse_ok("while true do\n  if a then break\n  continue\nend");
    let ExprKind::While { body, .. } = only_statement(&program) else {
        panic!("expected while");
    };
    let ExprKind::Block(range) = program.arena.get_expr(body).kind else {
        panic!("expected block");
    };
    let body = program.arena.get_expr_list(range);
    assert_eq!(body.len(), 2);
    assert_eq!(program.arena.get_expr(body[1]).kind, ExprKind::Continue);
}

#[test]
fn test_object_and_new() {
    let source = "object Point(x, y)\n  sum = fn() -> outer.x + outer.y\nend\np = new Point(1, 2)\nq = new Point";
    let (program, interner) = parse_ok(source);
    let stmts = statements(&program);
    let ExprKind::ObjectDef { name, params, .. } = program.arena.get_expr(stmts[0]).kind else {
        panic!("expected object");
    };
    assert_eq!(interner.lookup(name), "Point");
    assert_eq!(params.len(), 2);
    let ExprKind::Assign { value, .. } = program.arena.get_expr(stmts[1]).kind else {
        panic!("expected assignment");
    };
    assert!(matches!(
        program.arena.get_expr(value).kind,
        ExprKind::NewObject { args, .. } if args.len == 2
    ));
    let ExprKind::Assign { value, .. } = program.arena.get_expr(stmts[2]).kind else {
        panic!("expected assignment");
    };
    assert!(matches!(
        program.arena.get_expr(value).kind,
        ExprKind::NewObject { args, .. } if args.is_empty()
    ));
}

#[test]
fn test_list_literal_multiline() {
    let (program, interner) = parse_ok("[1, \"two\",\n 3.5, [true, null]]");
    let stmt = statements(&program)[0];
    assert_eq!(
        pretty::literal_source(&program.arena, &interner, stmt).as_deref(),
        Some("[1, \"two\", 3.5, [true, null]]")
    );
}

#[test]
fn test_semicolons_separate_statements() {
    let (program, _) = parse_ok("x = 1; f = fn() -> x + 1; f()");
    assert_eq!(statements(&program).len(), 3);
}

#[test]
fn test_empty_program() {
    let (program, _) = parse_ok("\n\n# only a comment\n");
    assert!(statements(&program).is_empty());
}

#[test]
fn test_missing_then() {
    let err = parse_err("if x 1");
    assert_eq!(err.message, "Expected 'then'");
    assert_eq!(err.span, Span::new(5, 6));
    assert_eq!(err.to_string(), "Invalid Syntax: Expected 'then'");
}

#[test]
fn test_missing_close_paren() {
    let err = parse_err("f(1, 2");
    assert_eq!(err.message, "Expected ')' or ','");
}

#[test]
fn test_missing_end() {
    let err = parse_err("while x do\n  x = x - 1\n");
    assert_eq!(err.message, "Expected 'end'");
}

#[test]
fn test_missing_arrow_or_body() {
    let err = parse_err("fn f() 1");
    assert_eq!(err.message, "Expected '->' or newline");
}

#[test]
fn test_bad_atom_message() {
    let err = parse_err("1 + )");
    assert!(err.message.starts_with("Expected int, float, identifier"));
    assert_eq!(err.span, Span::new(4, 5));
}

#[test]
fn test_trailing_tokens_rejected() {
    let err = parse_err("1 2");
    assert!(err.message.starts_with("Unexpected int"));
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn test_error_inside_assignment_value_is_reported() {
    let err = parse_err("x = (1 + ");
    assert!(err.message.starts_with("Expected int"));
}

#[test]
fn test_deeply_nested_parentheses() {
    let depth = 2_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let (program, _) = parse_ok(&source);
    assert_eq!(only_statement(&program), ExprKind::Int(1));
}

#[test]
fn test_nested_calls_parse_in_linear_passes() {
    let depth = 40;
    let source = format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));
    let (program, _) = parse_ok(&source);
    assert!(matches!(only_statement(&program), ExprKind::Call { .. }));
    // One Ident, one Call per level, plus the literal and the root block.
    assert_eq!(program.arena.len(), depth * 2 + 2);
}

#[test]
fn test_assignment_through_call_chain() {
    let (program, _) = parse_ok("make(1).field = 2\nitems(g(3)) == 4");
    let stmts = statements(&program);
    assert!(matches!(
        program.arena.get_expr(stmts[0]).kind,
        ExprKind::ScopeAssign { .. }
    ));
    assert!(matches!(
        program.arena.get_expr(stmts[1]).kind,
        ExprKind::Binary { op: BinaryOp::Eq, .. }
    ));
}
