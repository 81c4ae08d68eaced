//! End-to-end scenarios over the public API: declaring symbols in a scope,
//! parsing expression text against it, retyping symbols after the fact and
//! rendering the trees back to source form.

use indexmap::IndexMap;

use fortrans::expression::expressions::{Expression, ExprType};
use fortrans::expression::parser::parse_expression;
use fortrans::expression::stringifier::stringify;
use fortrans::expression::symbols::{Variable, VariableUpdate};
use fortrans::expression::visitor::{collect_variables, substitute};
use fortrans::scope::scope::Scope;
use fortrans::types::types::{DataType, SymbolType};

fn real_array(shape: Vec<Expression>) -> SymbolType {
    SymbolType::new(DataType::Real)
        .with_kind("jprb")
        .with_shape(shape)
}

#[test]
fn test_kernel_expression_workflow() {
    // A subroutine-like scope with a few declarations.
    let scope = Scope::new();
    scope.assign("klon", SymbolType::new(DataType::Integer).with_kind("jpim"));
    scope.assign("klev", SymbolType::new(DataType::Integer).with_kind("jpim"));
    let klon = parse_expression("klon", Some(&scope)).unwrap();
    let klev = parse_expression("klev", Some(&scope)).unwrap();
    scope.assign("ptemp", real_array(vec![klon, klev]));

    let expr = parse_expression("ptemp(jl, jk) * 0.5_jprb + zoffset", Some(&scope)).unwrap();
    assert_eq!(stringify(&expr), "ptemp(jl, jk) * 0.5_jprb + zoffset");

    // Loop indices and the offset were referenced before any declaration;
    // they resolve once assigned, without rebuilding the tree.
    let variables = collect_variables(&expr);
    let names: Vec<_> = variables.iter().map(|var| var.name().unwrap()).collect();
    assert_eq!(names, vec!["ptemp", "jl", "jk", "zoffset"]);
    assert!(scope.lookup("zoffset", false).unwrap().is_deferred());

    scope.assign("zoffset", SymbolType::new(DataType::Real).with_kind("jprb"));
    let zoffset = variables.last().unwrap();
    match zoffset {
        Expression::Scalar(scalar) => {
            assert_eq!(scalar.var_type().unwrap().dtype, DataType::Real);
        }
        other => panic!("expected a scalar node, got {:?}", other),
    }
}

#[test]
fn test_retyping_is_visible_through_old_nodes() {
    let scope = Scope::new();
    let var = Variable::new(
        "zq",
        &scope,
        Some(SymbolType::new(DataType::Real).with_kind("jprb")),
        None,
        None,
        None,
    )
    .unwrap();

    // A precision-demotion style pass rewrites the kind through any handle
    // to the symbol.
    let handle = parse_expression("zq", Some(&scope)).unwrap();
    match &handle {
        Expression::Scalar(scalar) => {
            let demoted = scalar.var_type().unwrap().with_kind("jprs");
            scalar.set_type(demoted).unwrap();
        }
        other => panic!("expected a scalar node, got {:?}", other),
    }

    match &var {
        Expression::Scalar(scalar) => {
            assert_eq!(scalar.var_type().unwrap().kind.as_deref(), Some("jprs"));
        }
        other => panic!("expected a scalar node, got {:?}", other),
    }
}

#[test]
fn test_derived_type_members_in_expressions() {
    let scope = Scope::new();
    let mut members = IndexMap::new();
    members.insert(
        String::from("values"),
        real_array(vec![parse_expression("100", Some(&scope)).unwrap()]),
    );
    members.insert(
        String::from("count"),
        SymbolType::new(DataType::Integer).with_kind("jpim"),
    );
    let state = Variable::new(
        "state",
        &scope,
        Some(SymbolType::derived(members)),
        None,
        None,
        None,
    )
    .unwrap();

    // Members are bound into the scope, so expression text referencing them
    // resolves to the declared types.
    let expr = parse_expression("state%values(state%count)", Some(&scope)).unwrap();
    assert_eq!(expr.get_expr_type(), ExprType::Array);
    assert_eq!(stringify(&expr), "state%values(state%count)");

    match &expr {
        Expression::Array(array) => {
            let entry = array.var_type().unwrap();
            assert_eq!(entry.dtype, DataType::Real);
            assert_eq!(entry.kind.as_deref(), Some("jprb"));
            assert_eq!(array.parent().unwrap(), state);
            assert_eq!(array.shape().len(), 1);
        }
        other => panic!("expected an array access, got {:?}", other),
    }
}

#[test]
fn test_variable_renaming_pass() {
    let scope = Scope::new();
    scope.assign("zq", SymbolType::new(DataType::Real).with_kind("jprb"));

    let expr = parse_expression("zq + zq * 2", Some(&scope)).unwrap();

    // Rename the symbol and rewrite every reference in the tree.
    let old = parse_expression("zq", Some(&scope)).unwrap();
    let new = match &old {
        Expression::Scalar(scalar) => scalar
            .clone_with(VariableUpdate {
                name: Some(String::from("zq_renamed")),
                ..Default::default()
            })
            .unwrap(),
        other => panic!("expected a scalar node, got {:?}", other),
    };
    let rewritten = substitute(&expr, &[(old, new)]);

    assert_eq!(stringify(&rewritten), "zq_renamed + zq_renamed * 2");
    assert_eq!(
        scope.lookup("zq_renamed", false).unwrap().kind.as_deref(),
        Some("jprb")
    );
}

#[test]
fn test_conditional_expression_round_trip() {
    let scope = Scope::new();
    let text = "jl <= klon .and. .not. ldone .or. zq(jl) > 0.5";
    scope.assign("zq", real_array(vec![parse_expression("10", Some(&scope)).unwrap()]));

    let expr = parse_expression(text, Some(&scope)).unwrap();

    assert_eq!(expr.get_expr_type(), ExprType::LogicalOr);
    assert_eq!(stringify(&expr), text);
    assert_eq!(expr.to_string(), text);
}

#[test]
fn test_nodes_survive_their_scope() {
    let expr = {
        let scope = Scope::new();
        scope.assign("zq", SymbolType::new(DataType::Real));
        parse_expression("zq + 1", Some(&scope)).unwrap()
    };

    // The tree still renders, but type access through the dead scope fails
    // safely instead of dereferencing freed state.
    assert_eq!(stringify(&expr), "zq + 1");
    match &collect_variables(&expr)[0] {
        Expression::Scalar(scalar) => {
            assert!(scalar.scope().is_none());
            assert!(scalar.var_type().is_none());
        }
        other => panic!("expected a scalar node, got {:?}", other),
    }
}
