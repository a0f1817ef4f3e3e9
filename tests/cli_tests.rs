// tests/cli_tests.rs

use scim_filter::ast::Token;
use scim_filter::cli::{
    CheckOptions, CliError, SqlOptions, execute_check, execute_sql, execute_tokens, parse_mapping,
    render_tokens,
};
use scim_filter::mapper::Column;
use serde_json::json;

fn check(filter: &str, patch: bool) -> CheckOptions {
    CheckOptions {
        filter: filter.to_string(),
        patch,
    }
}

#[test]
fn test_check_valid_filter() {
    let stmt = execute_check(&check(r#"userName Eq "bjensen""#, false)).unwrap();
    assert_eq!(stmt.to_string(), r#"userName eq "bjensen""#);
}

#[test]
fn test_check_reports_syntax_error() {
    let err = execute_check(&check("foo bar baz", false)).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert!(err.to_string().starts_with("Parse error: syntax error at 1:5"));
}

#[test]
fn test_check_keeps_leading_whitespace_in_positions() {
    let err = execute_check(&check(" foo bar baz", false)).unwrap_err();
    assert!(err.to_string().starts_with("Parse error: syntax error at 1:6"));

    let options = SqlOptions {
        filter: "\n  title & pr".to_string(),
        ..SqlOptions::default()
    };
    let err = execute_sql(&options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error: scan error: unexpected character '&' at 2:9"
    );
}

#[test]
fn test_check_patch_mode() {
    let filter = r#"members[value eq "u"].displayName"#;
    assert!(execute_check(&check(filter, false)).is_err());
    assert!(execute_check(&check(filter, true)).is_ok());
}

#[test]
fn test_blank_filter_is_no_input() {
    assert!(matches!(
        execute_check(&check("  \n", false)),
        Err(CliError::NoInput)
    ));
}

#[test]
fn test_tokens() {
    let tokens = execute_tokens(&check("title pr", false)).unwrap();
    let kinds: Vec<Token> = tokens.iter().map(|t| t.token.clone()).collect();
    assert_eq!(
        kinds,
        vec![Token::Identifier("title".to_string()), Token::Pr, Token::Eof]
    );
    assert_eq!(
        render_tokens(&tokens),
        "1:1\tIdentifier(\"title\")\n1:7\tPr\n1:9\tEof\n"
    );
}

#[test]
fn test_tokens_scan_error() {
    let err = execute_tokens(&check("title & pr", false)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error: scan error: unexpected character '&' at 1:7"
    );
}

#[test]
fn test_sql_output() {
    let options = SqlOptions {
        filter: r#"emails[type eq "work"] and userName sw "J""#.to_string(),
        ..SqlOptions::default()
    };
    let output = execute_sql(&options).unwrap();
    assert_eq!(
        output,
        json!({
            "sql": r#"SELECT * FROM "users" INNER JOIN "emails" ON "emails"."users_id" = "users"."id" WHERE (("emails"."type" = ?) AND ("userName" ~ ?))"#,
            "args": ["work", "^J"],
        })
    );
}

#[test]
fn test_sql_typed_args() {
    let options = SqlOptions {
        filter: "active eq true and loginCount gt 3".to_string(),
        table: "accounts".to_string(),
        dialect: "sqlite".to_string(),
        ..SqlOptions::default()
    };
    let output = execute_sql(&options).unwrap();
    assert_eq!(output["args"], json!([true, 3]));
    assert_eq!(
        output["sql"],
        json!(r#"SELECT * FROM "accounts" WHERE (("active" = ?) AND ("loginCount" > ?))"#)
    );
}

#[test]
fn test_sql_mappings() {
    let options = SqlOptions {
        filter: r#"userName eq "x""#.to_string(),
        mappings: vec!["userName=users.user_name".to_string()],
        strict: true,
        ..SqlOptions::default()
    };
    let output = execute_sql(&options).unwrap();
    assert_eq!(
        output["sql"],
        json!(r#"SELECT * FROM "users" WHERE ("users"."user_name" = ?)"#)
    );

    let options = SqlOptions {
        filter: "title pr".to_string(),
        ..options
    };
    assert!(matches!(execute_sql(&options), Err(CliError::Compile(_))));
}

#[test]
fn test_parse_mapping() {
    assert_eq!(
        parse_mapping(" title = job_title ").unwrap(),
        ("title".to_string(), Column::new("job_title"))
    );
    assert!(matches!(
        parse_mapping("title"),
        Err(CliError::InvalidMapping(_))
    ));
    assert!(matches!(
        parse_mapping("=col"),
        Err(CliError::InvalidMapping(_))
    ));
}

#[test]
fn test_sql_unsupported_dialect() {
    let options = SqlOptions {
        filter: "title pr".to_string(),
        dialect: "oracle".to_string(),
        ..SqlOptions::default()
    };
    let err = execute_sql(&options).unwrap_err();
    assert_eq!(err.to_string(), "Compile error: unsupported SQL dialect 'oracle'");
}
