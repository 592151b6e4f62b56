#[test]
fn gap_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/gap_error_pass.rs");
    t.pass("tests/ui/gap_error_without_context.rs");
}
