use sql_optimizer::syntax::{SyntaxChecker, UNPARSEABLE_MESSAGE};

#[test]
fn test_valid_statements_pass() {
    let checker = SyntaxChecker::new();
    for sql in [
        "SELECT id FROM users",
        "select * from users u join orders o on u.id = o.user_id",
        "DELETE FROM users",
        "UPDATE users SET active = 0 WHERE id = 1",
        "INSERT INTO users (id, name) VALUES (1, 'a')",
        "SELECT id FROM users; SELECT id FROM orders;"
    ] {
        let check = checker.check(sql);
        assert!(check.ok, "{} should parse", sql);
        assert!(check.message.is_none());
    }
}

#[test]
fn test_blank_input_passes() {
    let checker = SyntaxChecker::new();
    assert!(checker.check("").ok);
    assert!(checker.check("  \n\t").ok);
}

#[test]
fn test_parser_error_reported() {
    let check = SyntaxChecker::new().check("SELECT id FROM users WHERE");
    assert!(!check.ok);
    let message = check.message.unwrap();
    assert!(message.starts_with("SQL syntax error"));
}

#[test]
fn test_garbage_reported() {
    let check = SyntaxChecker::new().check("SELEC id FROM users");
    assert!(!check.ok);
    assert!(check.message.unwrap().starts_with("SQL syntax error"));
}

#[test]
fn test_tokenizer_error_reported() {
    let check = SyntaxChecker::new().check("SELECT 'unterminated");
    assert!(!check.ok);
    assert!(check.message.unwrap().starts_with("Unexpected parsing error"));
}

#[test]
fn test_no_statements_reported() {
    let check = SyntaxChecker::new().check(";");
    assert!(!check.ok);
    assert_eq!(check.message.as_deref(), Some(UNPARSEABLE_MESSAGE));
}
