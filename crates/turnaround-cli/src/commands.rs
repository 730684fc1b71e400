//! One-shot commands: render, options, records

use anyhow::{bail, Context, Result};
use chrono::Local;
use std::io::Write;
use std::path::Path;
use tracing::info;
use turnaround_core::{DashboardConfig, DataProvider, RenderError, Selection, TableRenderer, View};
use turnaround_engine::{Dashboard, InMemoryProvider, MockGenerator};
use turnaround_render::{DashboardPage, HtmlTableRenderer, NO_DATA_NOTICE};

/// What to render
pub struct RenderRequest {
    pub view: View,
    pub selection: Selection,
    /// Full dashboard page instead of the bare table
    pub page: bool,
    /// Include the table's style block
    pub styles: bool,
}

/// Build the base dataset for this process from the config
pub fn build_provider(config: &DashboardConfig) -> InMemoryProvider {
    let generator = MockGenerator::from_config(&config.data, config.delay);
    InMemoryProvider::generate(generator, Local::now().naive_local())
}

/// Table fragment, or `None` when nothing matches
pub fn render_fragment(
    renderer: &HtmlTableRenderer,
    dashboard: &Dashboard<'_, InMemoryProvider>,
    view: View,
    selection: &Selection,
) -> Result<Option<String>, RenderError> {
    match renderer.render(&dashboard.table(view, selection)) {
        Ok(html) => Ok(Some(html)),
        Err(RenderError::NoData) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Render the page markup for a request
pub fn render_markup(
    config: &DashboardConfig,
    dashboard: &Dashboard<'_, InMemoryProvider>,
    request: &RenderRequest,
) -> Result<Option<String>> {
    let renderer = HtmlTableRenderer::new()
        .palette(config.palette.clone())
        .include_styles(request.styles);
    let fragment = render_fragment(&renderer, dashboard, request.view, &request.selection)?;

    if !request.page {
        return Ok(fragment);
    }

    let selection = &request.selection;
    let aircraft_options = dashboard.aircraft_options(selection.scope, &selection.flights);
    let flight_options = dashboard.flight_options(selection.scope, &selection.aircraft);
    let page = DashboardPage {
        title: &config.title,
        palette: &config.palette,
        view: request.view,
        selection,
        aircraft_options: &aircraft_options,
        flight_options: &flight_options,
    };
    Ok(Some(page.render(fragment.as_deref())))
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

pub fn render(config: &DashboardConfig, request: &RenderRequest, output: Option<&Path>) -> Result<()> {
    let provider = build_provider(config);
    let dashboard = Dashboard::new(&provider, Local::now().date_naive());

    match render_markup(config, &dashboard, request)? {
        Some(markup) => write_output(&markup, output),
        None => bail!("{NO_DATA_NOTICE}: no task records match the selection"),
    }
}

pub fn options(config: &DashboardConfig, selection: &Selection, json: bool) -> Result<()> {
    let provider = build_provider(config);
    let dashboard = Dashboard::new(&provider, Local::now().date_naive());
    let aircraft = dashboard.aircraft_options(selection.scope, &selection.flights);
    let flights = dashboard.flight_options(selection.scope, &selection.aircraft);

    let content = if json {
        serde_json::to_string_pretty(&serde_json::json!({
            "date": selection.scope.as_str(),
            "aircraft": aircraft,
            "flights": flights,
        }))?
    } else {
        let mut text = String::from("Aircraft number:\n");
        for a in &aircraft {
            text.push_str(&format!("  {a}\n"));
        }
        text.push_str("Flight number:\n");
        for f in &flights {
            text.push_str(&format!("  {f}\n"));
        }
        text
    };
    write_output(&content, None)
}

pub fn records(config: &DashboardConfig, json: bool) -> Result<()> {
    let provider = build_provider(config);
    let content = if json {
        serde_json::to_string_pretty(provider.records())?
    } else {
        let mut text = format!(
            "{:<7} {:<7} {:<9} {:<36} {:<19} {:>4} {:>4}  {}\n",
            "AIRCRAFT", "FLIGHT", "PHASE", "TASK", "SPAN", "EST", "ACT", "DELAY"
        );
        for r in provider.records() {
            text.push_str(&format!(
                "{:<7} {:<7} {:<9} {:<36} {:<19} {:>4} {:>4}  {}\n",
                r.aircraft,
                r.flight,
                r.phase,
                r.task,
                r.duration_text(),
                r.estimated_minutes,
                r.actual_minutes,
                if r.delayed { "yes" } else { "" }
            ));
        }
        text
    };
    write_output(&content, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use turnaround_core::DateScope;

    fn fixture() -> (DashboardConfig, InMemoryProvider, NaiveDate) {
        let config = DashboardConfig::default();
        let now = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let provider = InMemoryProvider::generate(
            MockGenerator::from_config(&config.data, config.delay),
            now,
        );
        (config, provider, now.date())
    }

    #[test]
    fn fragment_and_page_markup() {
        let (config, provider, today) = fixture();
        let dashboard = Dashboard::new(&provider, today);
        let mut request = RenderRequest {
            view: View::All,
            selection: Selection::default(),
            page: false,
            styles: true,
        };

        let fragment = render_markup(&config, &dashboard, &request).unwrap().unwrap();
        assert!(fragment.starts_with("<style>"));
        assert!(!fragment.contains("<html"));

        request.page = true;
        let page = render_markup(&config, &dashboard, &request).unwrap().unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(&fragment));
    }

    #[test]
    fn empty_selection_has_no_fragment_but_a_page() {
        let (config, provider, today) = fixture();
        let dashboard = Dashboard::new(&provider, today);
        let mut request = RenderRequest {
            view: View::Departure,
            selection: Selection::new(DateScope::Today).aircraft(["Z0000"]),
            page: false,
            styles: false,
        };
        assert!(render_markup(&config, &dashboard, &request).unwrap().is_none());

        request.page = true;
        let page = render_markup(&config, &dashboard, &request).unwrap().unwrap();
        assert!(page.contains(NO_DATA_NOTICE));
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.html");
        write_output("<table></table>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<table></table>");
    }
}
