//! Fixtures shared by the rule unit tests.

use procedure_lint_core::{
    ClassDeclaration, ClassKind, Conventions, FileContext, ReflectionIndex, Rule,
    SuffixTestClassifier, Violation,
};
use std::path::Path;

pub const BASE: &str = "Tourze\\JsonRPC\\Core\\Procedure\\BaseProcedure";
pub const CAPABILITY: &str = "Tourze\\JsonRPC\\Core\\Contracts\\RpcParamInterface";
pub const EXPOSE: &str = "Tourze\\JsonRPC\\Core\\Attribute\\MethodExpose";
pub const TAG: &str = "Tourze\\JsonRPC\\Core\\Attribute\\MethodTag";
pub const DOC: &str = "Tourze\\JsonRPC\\Core\\Attribute\\MethodDoc";
pub const COVERS: &str = "PHPUnit\\Framework\\Attributes\\CoversClass";
pub const TEST_BASE: &str = "Tourze\\PHPUnitJsonRPC\\AbstractProcedureTestCase";
pub const TEST_PARAM: &str = "App\\Param\\TestParam";
pub const WRONG_PARAM: &str = "App\\Param\\WrongParam";

pub fn class(name: &str, extends: Option<&str>) -> ClassDeclaration {
    let mut c = ClassDeclaration::new(name);
    c.extends = extends.map(String::from);
    c
}

pub fn procedure(name: &str) -> ClassDeclaration {
    class(name, Some(BASE))
}

/// Framework and fixture types every rule test can resolve.
pub fn index() -> ReflectionIndex {
    let mut base = class(BASE, None);
    base.is_abstract = true;

    let mut capability = ClassDeclaration::new(CAPABILITY);
    capability.kind = ClassKind::Interface;

    let mut test_param = ClassDeclaration::new(TEST_PARAM);
    test_param.implements.push(CAPABILITY.to_string());

    let mut test_base = class(TEST_BASE, Some("PHPUnit\\Framework\\TestCase"));
    test_base.is_abstract = true;

    ReflectionIndex::new()
        .with(base)
        .with(capability)
        .with(test_param)
        .with(ClassDeclaration::new(WRONG_PARAM))
        .with(class("PHPUnit\\Framework\\TestCase", None))
        .with(test_base)
}

/// Runs `rule` on `class` the way the analyzer does, with `class` indexed.
pub fn check_with<R: Rule>(
    rule: &R,
    index: ReflectionIndex,
    class: &ClassDeclaration,
) -> Vec<Violation> {
    let index = index.with(class.clone());
    let tests = SuffixTestClassifier::default();
    let conventions = Conventions::default();
    let ctx = FileContext::new(Path::new("src/Fixture.php"), &index, &tests, &conventions);

    if rule.applies_to(&ctx, class) {
        rule.check(&ctx, class)
    } else {
        vec![]
    }
}

pub fn check<R: Rule>(rule: &R, class: &ClassDeclaration) -> Vec<Violation> {
    check_with(rule, index(), class)
}
