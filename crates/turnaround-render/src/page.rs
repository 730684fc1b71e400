//! Full HTML pages for the dashboard shell
//!
//! Two pages: the login gate and the dashboard itself (header with a live
//! clock, view tabs, filter form, then the task table or a "No Information"
//! notice). Filters travel as query parameters so every tab link and form
//! submission carries the complete selection.

use turnaround_core::{DateScope, Palette, Selection, View};

use crate::html_escape;

/// Notice shown when the selection matches no rows
pub const NO_DATA_NOTICE: &str = "No Information";

/// Notice shown after a failed login
pub const LOGIN_FAILED_NOTICE: &str = "Incorrect username or password";

/// Query string for a view and selection, e.g. `view=all&date=today&aircraft=A1000`
pub fn query_string(view: View, selection: &Selection) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("view", view.as_str());
    query.append_pair("date", selection.scope.as_str());
    for aircraft in &selection.aircraft {
        query.append_pair("aircraft", aircraft);
    }
    for flight in &selection.flights {
        query.append_pair("flight", flight);
    }
    query.finish()
}

fn base_css(palette: &Palette) -> String {
    format!(
        r#"body{{ margin:0; padding:16px; font-family:system-ui,-apple-system,"Segoe UI",sans-serif; background:#F8FAFC; color:#0f172a; }}
.app-header{{ display:flex; justify-content:space-between; align-items:center; background:{navy}; color:{navy_text}; padding:12px 16px; border-radius:12px; margin-bottom:10px; }}
.app-title{{ font-size:28px; margin:0; font-weight:700; letter-spacing:.2px; }}
.app-time{{ font-size:18px; font-weight:600; letter-spacing:.5px; opacity:.95; }}
.tabs{{ margin:12px 0; }}
.tabs a{{ display:inline-block; border:1px solid #cbd5e1; padding:8px 12px; margin-right:8px; border-radius:10px; background:#ffffff; color:#0f172a; text-decoration:none; }}
.tabs a:hover{{ border-color:{navy}; }}
.tabs a.active{{ background:{navy}; color:{navy_text}; border-color:{navy}; }}
.filters{{ display:grid; grid-template-columns:2fr 2fr 1.2fr auto; gap:12px; align-items:end; margin-bottom:12px; }}
.filter-label{{ font-size:13px; color:#475569; margin-bottom:6px; }}
.filters select{{ width:100%; border:1px solid #cbd5e1; border-radius:8px; padding:4px; }}
.filters button, .logout button{{ height:36px; border-radius:8px; border:1px solid {navy}; background:{navy}; color:{navy_text}; font-weight:600; padding:0 16px; cursor:pointer; }}
.notice{{ padding:12px 16px; border-radius:10px; background:#FEF9C3; color:#713F12; border:1px solid #FDE68A; }}
.table-wrap{{ max-height:92vh; border:1px solid #E5E7EB; }}
.table-wrap thead th{{ font-size:13px; line-height:1.25; vertical-align:bottom; }}"#,
        navy = palette.navy,
        navy_text = palette.navy_text,
    )
}

const CLOCK_JS: &str = r#"(function(){
  function pad(n){return n.toString().padStart(2,'0');}
  function tick(){
    const d = new Date();
    const s = pad(d.getDate())+'-'+pad(d.getMonth()+1)+'-'+d.getFullYear()
            +' '+pad(d.getHours())+':'+pad(d.getMinutes())+':'+pad(d.getSeconds());
    const el = document.getElementById('local-clock');
    if(el) el.textContent = s;
  }
  tick();
  setInterval(tick, 1000);
})();"#;

/// Login gate page
#[derive(Clone, Debug)]
pub struct LoginPage<'a> {
    pub title: &'a str,
    pub palette: &'a Palette,
    /// Show the failed-login notice
    pub failed: bool,
}

impl LoginPage<'_> {
    pub fn render(&self) -> String {
        let notice = if self.failed {
            format!(r#"<div class="login-error">{LOGIN_FAILED_NOTICE}</div>"#)
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Sign in</title>
    <style>
body{{ margin:0; font-family:system-ui,-apple-system,"Segoe UI",sans-serif; background:#F8FAFC; }}
.login-wrap{{ min-height:40vh; display:flex; align-items:flex-start; justify-content:center; padding:40px 16px; }}
.login{{ width:520px; border-radius:22px; background:#0E1A30; border:1px solid rgba(148,163,184,.18); box-shadow:0 35px 70px rgba(2,6,23,.45); color:#E5E7EB; padding:28px 26px 22px; }}
.login h2{{ margin:0 0 6px 0; text-align:center; font-size:24px; font-weight:800; color:#fff; }}
.field-label{{ font-size:13px; color:#cbd5e1; margin:12px 2px 6px 2px; font-weight:600; }}
.login input{{ box-sizing:border-box; width:100%; height:46px; background:#ffffff; color:#0f172a; border:1px solid #E2E8F0; border-radius:12px; padding:2px 12px; font-size:15px; }}
.login button{{ width:100%; height:48px; border-radius:12px; background:#F43F5E; color:#fff; border:1px solid #F43F5E; font-weight:800; margin-top:16px; font-size:15px; cursor:pointer; }}
.login-error{{ margin-top:14px; padding:10px 12px; border-radius:10px; background:{delay}; color:{delay_text}; font-weight:600; }}
    </style>
</head>
<body>
    <div class="login-wrap">
        <div class="login">
            <h2>Sign in to continue</h2>
            <form method="post" action="/login">
                <div class="field-label">Username</div>
                <input type="text" name="username" placeholder="login" autocomplete="username">
                <div class="field-label">Password</div>
                <input type="password" name="password" placeholder="password" autocomplete="current-password">
                <button type="submit">Sign In</button>
            </form>
            {notice}
        </div>
    </div>
</body>
</html>"#,
            title = html_escape(self.title),
            delay = self.palette.delay,
            delay_text = crate::contrast::text_color_for(&self.palette.delay),
            notice = notice,
        )
    }
}

/// Dashboard page
#[derive(Clone, Debug)]
pub struct DashboardPage<'a> {
    pub title: &'a str,
    pub palette: &'a Palette,
    pub view: View,
    pub selection: &'a Selection,
    pub aircraft_options: &'a [String],
    pub flight_options: &'a [String],
}

impl DashboardPage<'_> {
    /// Render the page around a table fragment; `None` shows the no-data notice
    pub fn render(&self, table_html: Option<&str>) -> String {
        let content = match table_html {
            Some(html) => html.to_string(),
            None => format!(r#"<div class="notice">{NO_DATA_NOTICE}</div>"#),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="app-header">
        <h1 class="app-title">{title}</h1>
        <div class="app-time"><span id="local-clock"></span></div>
    </div>
    <form class="logout" method="post" action="/logout"><button type="submit">Sign out</button></form>
{tabs}
{filters}
{content}
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(self.title),
            css = base_css(self.palette),
            tabs = self.render_tabs(),
            filters = self.render_filters(),
            content = content,
            js = CLOCK_JS,
        )
    }

    fn render_tabs(&self) -> String {
        let mut tabs = String::from("    <nav class=\"tabs\">");
        for view in View::TABS {
            let class = if view == self.view { " class=\"active\"" } else { "" };
            tabs.push_str(&format!(
                "<a href=\"/?{}\"{class}>{}</a>",
                html_escape(&query_string(view, self.selection)),
                view.label()
            ));
        }
        tabs.push_str("</nav>");
        tabs
    }

    fn render_filters(&self) -> String {
        let mut form = format!(
            "    <form class=\"filters\" method=\"get\" action=\"/\">\n        <input type=\"hidden\" name=\"view\" value=\"{}\">\n",
            self.view.as_str()
        );

        form.push_str(&multi_select(
            "Aircraft number",
            "aircraft",
            self.aircraft_options,
            &self.selection.aircraft,
        ));
        form.push_str(&multi_select(
            "Flight number",
            "flight",
            self.flight_options,
            &self.selection.flights,
        ));

        form.push_str("        <div><div class=\"filter-label\">Date</div><select name=\"date\">");
        for scope in DateScope::CHOICES {
            let selected = if scope == self.selection.scope { " selected" } else { "" };
            form.push_str(&format!(
                "<option value=\"{}\"{selected}>{}</option>",
                scope.as_str(),
                scope.label()
            ));
        }
        form.push_str("</select></div>\n");
        form.push_str("        <div><button type=\"submit\">Apply</button></div>\n    </form>");
        form
    }
}

/// Multi-select widget; chosen values missing from the options stay selectable
fn multi_select(label: &str, name: &str, options: &[String], chosen: &[String]) -> String {
    let mut html = format!(
        "        <div><div class=\"filter-label\">{label}</div><select name=\"{name}\" multiple size=\"4\">"
    );
    let extra = chosen.iter().filter(|c| !options.contains(*c));
    for value in options.iter().chain(extra) {
        let selected = if chosen.contains(value) { " selected" } else { "" };
        let value = html_escape(value);
        html.push_str(&format!("<option value=\"{value}\"{selected}>{value}</option>"));
    }
    html.push_str("</select></div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_repeats_list_parameters() {
        let sel = Selection::new(DateScope::Yesterday)
            .aircraft(["A1000", "B2000"])
            .flights(["KL 417"]);
        assert_eq!(
            query_string(View::Arrival, &sel),
            "view=arrival&date=yesterday&aircraft=A1000&aircraft=B2000&flight=KL+417"
        );
    }

    #[test]
    fn login_page_shows_failure_only_when_asked() {
        let palette = Palette::default();
        let page = LoginPage {
            title: "Ground Handling Tasks",
            palette: &palette,
            failed: false,
        };
        let html = page.render();
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("name=\"password\""));
        assert!(!html.contains(LOGIN_FAILED_NOTICE));

        let html = LoginPage { failed: true, ..page }.render();
        assert!(html.contains(LOGIN_FAILED_NOTICE));
    }

    fn page<'a>(palette: &'a Palette, selection: &'a Selection, options: &'a [String]) -> DashboardPage<'a> {
        DashboardPage {
            title: "Ops <Board>",
            palette,
            view: View::Departure,
            selection,
            aircraft_options: options,
            flight_options: &[],
        }
    }

    #[test]
    fn dashboard_marks_active_tab_and_selection() {
        let palette = Palette::default();
        let selection = Selection::new(DateScope::Today).aircraft(["B2000"]);
        let options = vec!["A1000".to_string(), "B2000".to_string()];
        let html = page(&palette, &selection, &options).render(Some("<table></table>"));

        assert!(html.contains("<title>Ops &lt;Board&gt;</title>"));
        assert!(html.contains(
            "<a href=\"/?view=departure&amp;date=today&amp;aircraft=B2000\" class=\"active\">Departure</a>"
        ));
        assert!(html.contains("<option value=\"B2000\" selected>B2000</option>"));
        assert!(html.contains("<option value=\"A1000\">A1000</option>"));
        assert!(html.contains("<option value=\"today\" selected>Today</option>"));
        assert!(html.contains("<input type=\"hidden\" name=\"view\" value=\"departure\">"));
        assert!(html.contains("<table></table>"));
        assert!(html.contains("local-clock"));
        assert!(!html.contains(NO_DATA_NOTICE));
    }

    #[test]
    fn dashboard_without_table_shows_notice() {
        let palette = Palette::default();
        let selection = Selection::default();
        let html = page(&palette, &selection, &[]).render(None);
        assert!(html.contains(NO_DATA_NOTICE));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn stale_selection_remains_selected() {
        let html = multi_select("Flight number", "flight", &["TA101".to_string()], &["ZZ999".to_string()]);
        assert!(html.contains("<option value=\"TA101\">TA101</option>"));
        assert!(html.contains("<option value=\"ZZ999\" selected>ZZ999</option>"));
    }
}
