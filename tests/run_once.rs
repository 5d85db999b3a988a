use termsh::Shell;

fn shell() -> Shell {
    Shell::new(".termsh_test_history", "test")
}

fn run(line: &str) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = shell().run_once_with(line, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn builtin_succeeds() {
    assert_eq!(run("echo   hello  world"), (0, "hello world\n".to_string(), String::new()));
}

#[test]
fn unknown_command_is_127() {
    let (code, out, err) = run("frobnicate --now");
    assert_eq!(code, 127);
    assert!(out.is_empty());
    assert_eq!(err, "termsh: command not found: frobnicate\n");
}

#[test]
fn exit_code_is_forwarded() {
    assert_eq!(run("  exit   4 "), (4, String::new(), String::new()));
}

#[test]
fn blank_line_is_a_no_op() {
    assert_eq!(run(" \t "), (0, String::new(), String::new()));
}

#[test]
fn history_sees_only_its_own_line() {
    let (code, out, _) = run("history");
    assert_eq!(code, 0);
    assert_eq!(out, "    1  history\n");
}

#[test]
fn run_once_writes_to_process_streams() {
    assert_eq!(shell().run_once("exit 9"), 9);
}
