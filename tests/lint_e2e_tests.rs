use std::fs;
use tailwind_linter::{check_with_bridge, CheckArgs, TailwindBridge};
use tempfile::tempdir;

fn check_args(input: Vec<String>, fix: bool) -> CheckArgs {
    CheckArgs {
        input,
        exclude: vec![],
        config: None,
        fix,
        rule: vec![],
        jobs: None,
        verbose: false,
    }
}

#[test]
fn test_end_to_end_fix_jsx() {
    let temp_dir = tempdir().unwrap();

    let jsx_file = temp_dir.path().join("component.jsx");
    fs::write(
        &jsx_file,
        r#"
const Button = () => {
    return (
        <button className=" px-4  py-2 ">
            Click me
        </button>
    );
};

const chip = ctl(" lint ");
"#,
    )
    .unwrap();

    let args = check_args(vec![format!("{}/*.jsx", temp_dir.path().display())], true);
    let result = check_with_bridge(args, TailwindBridge::in_process()).unwrap();

    assert_eq!(result.files_processed, 1);
    assert!(result.total_fixes > 0);

    let fixed = fs::read_to_string(&jsx_file).unwrap();
    assert!(fixed.contains(r#"className="px-4 py-2""#), "got: {fixed}");
    assert!(fixed.contains(r#"ctl("lint")"#), "got: {fixed}");
}

#[test]
fn test_end_to_end_sort_markup() {
    let temp_dir = tempdir().unwrap();

    let html_file = temp_dir.path().join("page.html");
    fs::write(&html_file, r#"<img class="p-4 block" />"#).unwrap();

    let args = check_args(vec![format!("{}/*.html", temp_dir.path().display())], true);
    let result = check_with_bridge(args, TailwindBridge::in_process()).unwrap();
    assert!(result.total_fixes > 0);

    let fixed = fs::read_to_string(&html_file).unwrap();
    assert_eq!(fixed, r#"<img class="block p-4" />"#);
}

#[test]
fn test_end_to_end_report_without_fix() {
    let temp_dir = tempdir().unwrap();

    let jsx_file = temp_dir.path().join("app.jsx");
    let source = r#"const el = <div className=" messy " />;"#;
    fs::write(&jsx_file, source).unwrap();

    let args = check_args(vec![format!("{}/*.jsx", temp_dir.path().display())], false);
    let result = check_with_bridge(args, TailwindBridge::in_process()).unwrap();

    assert_eq!(result.files_with_violations, 1);
    assert!(result.total_diagnostics > 0);
    assert_eq!(result.total_fixes, 0);
    // File untouched
    assert_eq!(fs::read_to_string(&jsx_file).unwrap(), source);
}

#[test]
fn test_end_to_end_multiple_argument_violations() {
    let temp_dir = tempdir().unwrap();

    let jsx_file = temp_dir.path().join("join.jsx");
    fs::write(
        &jsx_file,
        r#"const c = twJoin(" lint ", [" lint ", " lint "]);"#,
    )
    .unwrap();

    let mut args = check_args(vec![format!("{}/*.jsx", temp_dir.path().display())], false);
    args.rule = vec!["no-unnecessary-whitespace".to_string()];
    let result = check_with_bridge(args, TailwindBridge::in_process()).unwrap();

    // One whitespace violation per matched string
    assert_eq!(result.total_diagnostics, 3);
}

#[test]
fn test_end_to_end_fix_is_idempotent() {
    let temp_dir = tempdir().unwrap();

    let jsx_file = temp_dir.path().join("app.jsx");
    fs::write(
        &jsx_file,
        r#"const el = <div className="p-4  flex p-4 m-2" />;"#,
    )
    .unwrap();

    let pattern = format!("{}/*.jsx", temp_dir.path().display());
    check_with_bridge(check_args(vec![pattern.clone()], true), TailwindBridge::in_process())
        .unwrap();
    let first = fs::read_to_string(&jsx_file).unwrap();

    let result = check_with_bridge(check_args(vec![pattern], true), TailwindBridge::in_process())
        .unwrap();
    let second = fs::read_to_string(&jsx_file).unwrap();

    assert_eq!(first, second);
    assert_eq!(result.total_fixes, 0);
    assert!(first.contains(r#"className="flex m-2 p-4""#), "got: {first}");
}

#[test]
fn test_end_to_end_rule_selection() {
    let temp_dir = tempdir().unwrap();

    let jsx_file = temp_dir.path().join("app.jsx");
    fs::write(&jsx_file, r#"const el = <div className=" a  a " />;"#).unwrap();

    let mut args = check_args(vec![format!("{}/*.jsx", temp_dir.path().display())], true);
    args.rule = vec!["no-unnecessary-whitespace".to_string()];
    check_with_bridge(args, TailwindBridge::in_process()).unwrap();

    // Only whitespace fixed; the duplicate stays because its rule did not run
    let fixed = fs::read_to_string(&jsx_file).unwrap();
    assert!(fixed.contains(r#"className="a a""#), "got: {fixed}");
}

#[test]
fn test_end_to_end_excluded_files_skipped() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("a.jsx"), r#"const x = <p className=" y " />;"#).unwrap();
    fs::write(
        temp_dir.path().join("a.test.jsx"),
        r#"const x = <p className=" y " />;"#,
    )
    .unwrap();

    let mut args = check_args(vec![format!("{}/*.jsx", temp_dir.path().display())], false);
    args.exclude = vec![format!("{}/*.test.jsx", temp_dir.path().display())];
    let result = check_with_bridge(args, TailwindBridge::in_process()).unwrap();

    assert_eq!(result.files_processed, 1);
}
