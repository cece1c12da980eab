//! Operating system classification from raw user-agent strings.
//!
//! The label is derived at query time and never stored. A single rule table
//! drives both the SQL CASE expression used by the aggregation query and the
//! pure classifier below, so the two cannot drift apart.

/// Substring rules checked in order; the first match wins. A user agent
/// carrying both "Android" and "Linux" tokens classifies as Android because
/// the Android rule is checked first.
const OS_RULES: [(&str, &str); 5] = [
    ("windows", "Windows"),
    ("macintosh", "MacOS"),
    ("iphone", "iOS"),
    ("android", "Android"),
    ("linux", "Linux"),
];

/// Label for user agents that match no rule, including absent ones.
pub const OS_OTHER: &str = "Other";

/// Classify a user-agent string into an operating system label.
pub fn classify_os(user_agent: Option<&str>) -> &'static str {
    let Some(ua) = user_agent else {
        return OS_OTHER;
    };

    let ua = ua.to_lowercase();
    OS_RULES
        .iter()
        .find(|(needle, _)| ua.contains(needle))
        .map(|(_, label)| *label)
        .unwrap_or(OS_OTHER)
}

/// Render the classification rules as a SQL CASE expression over `column`.
/// NULL user agents fall through every WHEN arm and land on the ELSE label.
pub fn os_case_expression(column: &str) -> String {
    let mut expr = String::from("CASE");
    for (needle, label) in OS_RULES {
        expr.push_str(&format!(
            "\n                    WHEN {} ILIKE '%{}%' THEN '{}'",
            column, needle, label
        ));
    }
    expr.push_str(&format!(
        "\n                    ELSE '{}'\n                END",
        OS_OTHER
    ));
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_desktop_platforms() {
        let windows = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
        assert_eq!(classify_os(Some(windows)), "Windows");

        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
        assert_eq!(classify_os(Some(mac)), "MacOS");

        let linux = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/119.0";
        assert_eq!(classify_os(Some(linux)), "Linux");
    }

    #[test]
    fn test_classify_mobile_platforms() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) Safari/604.1";
        assert_eq!(classify_os(Some(iphone)), "iOS");

        // Android UAs carry a Linux token too; the Android rule runs first
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/119.0.0.0 Mobile";
        assert_eq!(classify_os(Some(android)), "Android");
    }

    #[test]
    fn test_classify_priority_beats_string_position() {
        // Windows appears later in the rule check order than in the string,
        // but the rule order decides, not the token position
        let ua = "Mozilla/5.0 (Windows NT 10.0; Android)";
        assert_eq!(classify_os(Some(ua)), "Windows");
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify_os(Some("WINDOWS nt")), "Windows");
        assert_eq!(classify_os(Some("ipHoNe os")), "iOS");
    }

    #[test]
    fn test_classify_unknown_and_absent() {
        assert_eq!(classify_os(None), OS_OTHER);
        assert_eq!(classify_os(Some("")), OS_OTHER);
        assert_eq!(classify_os(Some("curl/8.4.0")), OS_OTHER);
        assert_eq!(classify_os(Some("Googlebot/2.1")), OS_OTHER);
    }

    #[test]
    fn test_case_expression_mirrors_rule_order() {
        let expr = os_case_expression("user_agent");

        assert!(expr.starts_with("CASE"));
        assert!(expr.trim_end().ends_with("END"));
        assert!(expr.contains("ELSE 'Other'"));

        // WHEN arms appear in rule priority order
        let windows_pos = expr.find("'%windows%'").unwrap();
        let android_pos = expr.find("'%android%'").unwrap();
        let linux_pos = expr.find("'%linux%'").unwrap();
        assert!(windows_pos < android_pos);
        assert!(android_pos < linux_pos);
    }
}
