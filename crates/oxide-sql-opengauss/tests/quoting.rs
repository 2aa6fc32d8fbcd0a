use oxide_sql_opengauss::quote::quote;
use rstest::rstest;

#[rstest]
#[case("users")]
#[case("public.users")]
#[case("x.y.z")]
#[case("a\"b")]
#[case("a\"b.c")]
#[case("a\"\"b")]
#[case("a\"")]
#[case("naïve name")]
fn test_requoting_is_stable(#[case] name: &str) {
    let once = quote(name);
    assert_eq!(quote(&once), once);
}

#[rstest]
#[case("users", "\"users\"")]
#[case("a\"b", "\"a\"\"b\"")]
#[case("schema.table", "\"schema\".\"table\"")]
#[case("\"schema\".table", "\"schema\".\"table\"")]
#[case("\"odd.name\".col", "\"odd.name\".\"col\"")]
fn test_quote(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(quote(name), expected);
}

#[test]
fn test_embedded_quote_count_matches_single_pass() {
    let escaped = quote("a\"b");
    let count = |s: &str| s.matches('"').count();
    assert_eq!(count(&quote(&escaped)), count(&escaped));
}
