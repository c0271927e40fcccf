use super::*;

mod normalize_lower {
    use super::*;

    #[test]
    fn should_return_ascii_lowercase_when_origin_has_uppercase_host() {
        let result = normalize_lower("HTTP://LocalHost:5173");

        assert_eq!(result, "http://localhost:5173");
    }

    #[test]
    fn should_lowercase_unicode_when_input_is_not_ascii() {
        let result = normalize_lower("HTTP://BÜCHER.TEST");

        assert_eq!(result, "http://bücher.test");
    }
}

mod equals_ignore_case {
    use super::*;

    #[test]
    fn should_match_origins_that_differ_only_in_case() {
        assert!(equals_ignore_case(
            "http://localhost:5173",
            "HTTP://LOCALHOST:5173"
        ));
    }

    #[test]
    fn should_reject_origins_with_different_ports() {
        assert!(!equals_ignore_case(
            "http://localhost:5173",
            "http://localhost:5174"
        ));
    }

    #[test]
    fn should_match_unicode_values_case_insensitively() {
        assert!(equals_ignore_case("TÉST", "tést"));
        assert!(!equals_ignore_case("Ápp", "Ápd"));
    }
}

mod is_http_token {
    use super::*;

    #[test]
    fn should_accept_method_and_header_names() {
        assert!(is_http_token("DELETE"));
        assert!(is_http_token("X-Requested-With"));
        assert!(is_http_token("*"));
    }

    #[test]
    fn should_reject_separators_and_whitespace() {
        assert!(!is_http_token("GET POST"));
        assert!(!is_http_token("Header:Value"));
        assert!(!is_http_token(""));
    }
}

mod split_header_list {
    use super::*;

    #[test]
    fn should_trim_entries_and_skip_blanks() {
        let entries: Vec<&str> = split_header_list(" Content-Type , ,X-Trace,").collect();

        assert_eq!(entries, vec!["Content-Type", "X-Trace"]);
    }
}
