//! AppleScript sources for browser and application automation.
//!
//! Scripts are built here and executed by the macOS bridge. Every script is
//! guarded by `if application "X" is running` so it never launches the app.

use super::types::BrowserTab;

/// Quote `value` as an AppleScript string literal.
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Lists every tab as `window id <TAB> tab index <TAB> url`, one per line.
pub fn list_tabs_script(browser: &str) -> String {
    let app = quote(browser);
    format!(
        r#"if application {app} is running then
    tell application {app}
        set sep to character id 9
        set output to ""
        repeat with w in windows
            try
                set wid to id of w
                set idx to 0
                repeat with t in tabs of w
                    set idx to idx + 1
                    set output to output & wid & sep & idx & sep & (URL of t as string) & linefeed
                end repeat
            end try
        end repeat
        return output
    end tell
end if
return """#
    )
}

/// Closes `tabs`, highest index first within each window so earlier
/// indices stay valid while the script runs.
pub fn close_tabs_script(browser: &str, tabs: &[BrowserTab]) -> String {
    let mut ordered: Vec<&BrowserTab> = tabs.iter().collect();
    ordered.sort_by(|a, b| a.window_id.cmp(&b.window_id).then(b.index.cmp(&a.index)));

    let app = quote(browser);
    let mut body = String::new();
    for tab in ordered {
        body.push_str(&format!(
            "        try\n            close tab {} of (first window whose id is {})\n        end try\n",
            tab.index, tab.window_id
        ));
    }

    format!("if application {app} is running then\n    tell application {app}\n{body}    end tell\nend if")
}

pub fn quit_script(app_name: &str) -> String {
    let app = quote(app_name);
    format!("if application {app} is running then\n    tell application {app} to quit\nend if")
}

/// Parse the output of [`list_tabs_script`]. Malformed lines are skipped.
pub fn parse_tab_listing(output: &str) -> Vec<BrowserTab> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '\t');
            let window_id = parts.next()?.trim().parse().ok()?;
            let index = parts.next()?.trim().parse().ok()?;
            let url = parts.next()?.trim().to_string();
            Some(BrowserTab {
                window_id,
                index,
                url,
            })
        })
        .collect()
}
