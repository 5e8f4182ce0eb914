use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::*;

/// `Wed, 09 Jun 2021 10:18:14 GMT`
const JUN_9_2021: u64 = 1623233894;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn parse_at(value: &str, now: u64) -> Cookie {
    parse_with(value, &DateFormats::legacy(), at(now)).unwrap()
}

macro_rules! assert_cookie {
    (
        $cookie:expr;
        $name:expr, $value:expr, $max_age:expr, $secure:expr;
    ) => {
        let cookie = $cookie;
        assert_eq!(cookie.name(), $name);
        assert_eq!(cookie.value(), $value);
        assert_eq!(cookie.max_age(), $max_age);
        assert_eq!(cookie.is_secure(), $secure);
    };
}

// ===== Decode =====

#[test]
fn test_parse() {
    assert_cookie! {
        parse("foo=bar; Max-Age=100; Secure").unwrap();
        "foo", Some("bar"), 100, true;
    }

    assert_cookie! {
        parse("foo=bar").unwrap();
        "foo", Some("bar"), Cookie::SESSION, false;
    }

    assert_cookie! {
        parse("foo").unwrap();
        "foo", None, Cookie::SESSION, false;
    }

    assert_cookie! {
        parse("foo=").unwrap();
        "foo", Some(""), Cookie::SESSION, false;
    }

    assert_cookie! {
        parse("token=abc=def;secure").unwrap();
        "token", Some("abc=def"), Cookie::SESSION, true;
    }

    assert_cookie! {
        parse("a=b; HttpOnly; Comment=hi; Discard; =x; flag").unwrap();
        "a", Some("b"), Cookie::SESSION, false;
    }
}

#[test]
fn test_parse_attributes() {
    let cookie = parse(r#"sid="x y"; Domain=".example.com"; Path="/app"; MAX-AGE="60""#).unwrap();
    assert_eq!(cookie.value(), Some("x y"));
    assert_eq!(cookie.domain(), Some(".example.com"));
    assert_eq!(cookie.path(), Some("/app"));
    assert_eq!(cookie.max_age(), 60);
    assert_eq!(cookie.version(), 0);
    assert!(cookie.ports().is_empty());

    let cookie = parse(r#"a=b; Version=1; Port="80, 8080,nope""#).unwrap();
    assert_eq!(cookie.version(), 1);
    assert_eq!(cookie.ports().iter().copied().collect::<Vec<_>>(), [80, 8080]);

    let cookie = parse("a=b; domain=; path").unwrap();
    assert_eq!(cookie.domain(), None);
    assert_eq!(cookie.path(), None);
}

#[test]
fn test_parse_unterminated_quote() {
    assert_cookie! {
        parse(r#"sid="abc; Secure; Max-Age=0"#).unwrap();
        "sid", Some(r#""abc"#), 0, true;
    }

    let cookie = parse(r#"sid="x\"; Secure; Path=/"#).unwrap();
    assert!(cookie.is_secure());
    assert_eq!(cookie.path(), Some("/"));

    let cookie = parse(r#"sid=abc; Path="/a; Secure"#).unwrap();
    assert_eq!(cookie.value(), Some("abc"));
    assert_eq!(cookie.path(), Some(r#""/a"#));
    assert!(cookie.is_secure());
}

#[test]
fn test_parse_empty_name() {
    assert_eq!(parse("=bar"), Err(CookieError::EmptyName));
    assert_eq!(parse(""), Err(CookieError::EmptyName));
    assert_eq!(parse("; Secure"), Err(CookieError::EmptyName));
    assert_eq!(Cookie::new(""), Err(CookieError::EmptyName));
}

#[test]
fn test_max_age() {
    assert_eq!(parse("a=b; Max-Age=-30").unwrap().max_age(), 0);
    assert_eq!(parse("a=b; Max-Age=abc").unwrap().max_age(), Cookie::SESSION);
    assert_eq!(parse("a=b; Max-Age=0").unwrap().max_age(), 0);
    // first max-age wins
    assert_eq!(parse("a=b; Max-Age=5; Max-Age=10").unwrap().max_age(), 5);
}

#[test]
fn test_expires() {
    let expires = "foo=bar; expires=Wed, 09-Jun-2021 10:18:14 GMT";

    // clamped once the date has passed
    assert_cookie! {
        parse_at(expires, JUN_9_2021 + 86400);
        "foo", Some("bar"), 0, false;
    }
    assert_eq!(parse(expires).unwrap().max_age(), 0);

    assert_eq!(parse_at(expires, JUN_9_2021 - 3600).max_age(), 3600);
    assert_eq!(
        parse_at("a=b; Expires=Wed, 09 Jun 2021 10:18:14 GMT", JUN_9_2021 - 60).max_age(),
        60
    );
    assert_eq!(
        parse_at(r#"a=b; Expires="Wed Jun  9 10:18:14 2021""#, JUN_9_2021 - 1).max_age(),
        1
    );

    // only the first expires is evaluated
    assert_eq!(
        parse_at(
            "a=b; Expires=Wed, 09 Jun 2021 10:18:14 GMT; Expires=3600",
            JUN_9_2021 - 60
        )
        .max_age(),
        60
    );
}

#[test]
fn test_expires_as_seconds() {
    assert_eq!(parse("a=b; expires=3600").unwrap().max_age(), 3600);
    assert_eq!(parse("a=b; expires=-5").unwrap().max_age(), 0);
    assert_eq!(parse("a=b; expires=soon").unwrap().max_age(), Cookie::SESSION);
}

#[test]
fn test_max_age_over_expires() {
    let now = JUN_9_2021 - 3600;

    assert_eq!(
        parse_at("a=b; Max-Age=10; Expires=Wed, 09 Jun 2021 10:18:14 GMT", now).max_age(),
        10
    );
    assert_eq!(
        parse_at("a=b; Expires=Wed, 09 Jun 2021 10:18:14 GMT; Max-Age=10", now).max_age(),
        10
    );
    // an unparseable max-age still shadows expires
    assert_eq!(
        parse_at("a=b; Expires=Wed, 09 Jun 2021 10:18:14 GMT; Max-Age=x", now).max_age(),
        Cookie::SESSION
    );
    assert_eq!(
        parse_at("a=b; Max-Age=x; Expires=Wed, 09 Jun 2021 10:18:14 GMT", now).max_age(),
        Cookie::SESSION
    );
}

#[test]
fn test_custom_date_formats() {
    let formats = DateFormats::new(vec![]);
    let cookie = parse_with(
        "a=b; Expires=Wed, 09 Jun 2021 10:18:14 GMT",
        &formats,
        at(JUN_9_2021 - 60),
    )
    .unwrap();
    assert_eq!(cookie.max_age(), Cookie::SESSION);

    let formats = DateFormats::new(vec![RFC1123, RFC850_OFFSET]);
    let cookie = parse_with(
        "a=b; Expires=Wed, 09 Jun 2021 10:18:14 GMT",
        &formats,
        at(JUN_9_2021 - 60),
    )
    .unwrap();
    assert_eq!(cookie.max_age(), 60);

    let cookie = parse_with(
        "a=b; Expires=Wed Jun  9 10:18:14 2021",
        &formats,
        at(JUN_9_2021 - 60),
    )
    .unwrap();
    assert_eq!(cookie.max_age(), Cookie::SESSION);
}

#[test]
fn test_parse_request_form() {
    let cookie =
        parse(r#"$Version=1; sid=abc; $Path=/; $Domain=example.com; $Port="80,443""#).unwrap();
    assert_eq!(cookie.name(), "sid");
    assert_eq!(cookie.value(), Some("abc"));
    assert_eq!(cookie.version(), 1);
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.domain(), Some("example.com"));
    assert_eq!(cookie.ports().len(), 2);
}

// ===== Encode =====

#[test]
fn test_encode() {
    let cookie = Cookie::new("a").unwrap().with_value("has space");
    assert_eq!(encode([&cookie]), r#"a="has space""#);

    let cookie = Cookie::new("a").unwrap().with_value("plain");
    assert_eq!(encode([&cookie]), "a=plain");

    let cookie = Cookie::new("a").unwrap();
    assert_eq!(encode([&cookie]), r#"a="""#);

    assert_eq!(encode(Vec::<&Cookie>::new()), "");
}

#[test]
fn test_encode_attributes() {
    let cookies = [
        Cookie::new("sid")
            .unwrap()
            .with_value("abc")
            .with_path("/")
            .with_domain("example.com")
            .with_version(1)
            .with_ports([8080, 80]),
        Cookie::new("theme")
            .unwrap()
            .with_value("dark")
            .with_path("/a b")
            .with_ports([443]),
    ];

    assert_eq!(
        encode(&cookies),
        r#"$Version=1;sid=abc;$Path="/";$Domain=example.com;$Port="80,8080";theme=dark;$Path="/a b""#
    );
}

#[test]
fn test_encode_escape() {
    let cookie = Cookie::new("q").unwrap().with_value(r#"say "hi" \o/"#);
    assert_eq!(encode([&cookie]), r#"q="say \"hi\" \\o/""#);
}

#[test]
fn test_roundtrip() {
    let values = [
        "plain",
        "has space",
        r#"quote"inside"#,
        r"back\slash",
        "semi;colon",
        "a=b",
        "trailing ",
        "(){}[]<>@,:?/",
        "",
    ];

    for value in values {
        let cookie = Cookie::new("name")
            .unwrap()
            .with_value(value)
            .with_path("/p q")
            .with_domain("example.com");
        let decoded = parse(&encode([&cookie])).unwrap();
        assert_eq!(decoded, cookie, "roundtrip of {value:?}");
    }

    let cookie = Cookie::new("v1")
        .unwrap()
        .with_value(r#"x"y"#)
        .with_version(1)
        .with_ports([80, 8443]);
    assert_eq!(parse(&encode([&cookie])).unwrap(), cookie);
}

const _: () = {
    const fn is_send_sync<T: Send + Sync>() { }
    is_send_sync::<Cookie>();
    is_send_sync::<DateFormats>();
};
