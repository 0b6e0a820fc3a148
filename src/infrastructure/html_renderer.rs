// HTML rendering of a dashboard: page chrome, sidebar menus, cards, charts and tables
use crate::domain::dashboard::{Card, ChartData, Dashboard, DataTable};
use crate::domain::production::Granularity;
use crate::domain::view::{MainSection, SubSection, View};
use crate::infrastructure::plotly_mapper::chart_to_figure;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const USER_ICON: &str = "https://cdn-icons-png.flaticon.com/512/847/847969.png";

const STYLE: &str = r#"
body { margin: 0; font-family: Arial, sans-serif; display: flex; min-height: 100vh; }
.top-bar {
    position: fixed; top: 0; right: 0; width: 15%; height: 40px;
    background-color: #000000; color: #FFFFFF;
    display: flex; justify-content: flex-start; align-items: center;
    padding: 0 20px; z-index: 100; border-bottom: 1px solid #ddd;
}
.user-icon { display: flex; align-items: center; gap: 10px; font-weight: 500; }
.user-icon img { width: 32px; height: 32px; border-radius: 50%; border: 1px solid #999; }
.sidebar { width: 370px; background: #f0f2f6; padding: 20px; box-sizing: border-box; }
.sidebar img.logo { width: 100%; }
.sidebar h3 { margin: 18px 0 8px; font-size: 15px; }
.sidebar a { display: block; padding: 6px 8px; border-radius: 6px; color: #31333f; text-decoration: none; }
.sidebar a.selected { background: #ff4b4b; color: #FFFFFF; }
.sidebar label { display: block; margin-top: 8px; font-size: 14px; }
.block-container { flex: 1; padding: 70px 40px 40px; box-sizing: border-box; }
.columns { display: flex; gap: 16px; }
.column { flex: 1; }
.info { background: #e8f0fe; border-radius: 8px; padding: 16px; color: #1c4e80; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 4px 8px; text-align: right; }
th:first-child, td:first-child { text-align: left; }
details { margin: 12px 0; }
"#;

/// Query string link back to the dashboard page.
pub fn page_link(params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query.join("&"))
    }
}

/// Link a primary menu entry points at. The dashboard entry carries the
/// first sub-section, as a freshly shown sub-menu has it selected.
fn section_link(section: MainSection) -> String {
    match section {
        MainSection::Dashboard => sub_section_link(SubSection::default()),
        other => page_link(&[("section", other.slug())]),
    }
}

fn sub_section_link(sub: SubSection) -> String {
    page_link(&[("section", MainSection::Dashboard.slug()), ("sub", sub.slug())])
}

pub fn render_page(dashboard: &Dashboard) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                title { "Tableau de bord" }
                style { (PreEscaped(STYLE)) }
                @if !dashboard.charts.is_empty() {
                    script src=(PLOTLY_CDN) {}
                }
            }
            body {
                div.top-bar {
                    div.user-icon {
                        span { "👤 Utilisateur connecté" }
                        img src=(USER_ICON) alt="user";
                    }
                }
                (sidebar(&dashboard.view))
                main.block-container {
                    (content(dashboard))
                }
            }
        }
    };
    markup.into_string()
}

pub fn render_error_page(message: &str) -> String {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                title { "Erreur" }
            }
            body {
                h1 { "Erreur" }
                pre { (message) }
            }
        }
    }
    .into_string()
}

fn sidebar(view: &View) -> Markup {
    let current = view.main_section();
    let current_sub = view.sub_section();

    html! {
        nav.sidebar {
            img.logo src="/static/logo" alt="logo";

            h3 { "Section principale" }
            @for section in MainSection::ALL {
                (menu_item(&section_link(section), section.label(), section == current))
            }

            @if current == MainSection::Dashboard {
                h3 { "Sous-section" }
                @for sub in SubSection::ALL {
                    (menu_item(&sub_section_link(sub), sub.label(), Some(sub) == current_sub))
                }
            }

            @if let View::Device(range) = view {
                h3 { "📅 Période personnalisée" }
                form method="get" action="/" {
                    (hidden_selection(SubSection::Device))
                    (range_input("📅 Date de début", "date", "start_date", range.start.format("%Y-%m-%d").to_string()))
                    (range_input("🕒 Heure de début", "time", "start_time", range.start.format("%H:%M").to_string()))
                    (range_input("📅 Date de fin", "date", "end_date", range.end.format("%Y-%m-%d").to_string()))
                    (range_input("🕒 Heure de fin", "time", "end_time", range.end.format("%H:%M").to_string()))
                    button type="submit" { "Appliquer" }
                }
            }
        }
    }
}

fn range_input(label: &str, kind: &str, name: &str, value: String) -> Markup {
    html! {
        label {
            (label)
            br;
            input type=(kind) name=(name) value=(value);
        }
    }
}

fn hidden_selection(sub: SubSection) -> Markup {
    html! {
        input type="hidden" name="section" value=(MainSection::Dashboard.slug());
        input type="hidden" name="sub" value=(sub.slug());
    }
}

fn menu_item(link: &str, label: &str, selected: bool) -> Markup {
    html! {
        a href=(link) class=[selected.then_some("selected")] { (label) }
    }
}

fn content(dashboard: &Dashboard) -> Markup {
    html! {
        @if let Some(title) = &dashboard.title {
            h1 { (title) }
        }
        @if let Some(info) = &dashboard.info {
            div.info { (info) }
        }
        @if let View::Production(granularity) = dashboard.view {
            (granularity_select(granularity))
        }
        @if let Some(subheader) = &dashboard.subheader {
            h2 { (subheader) }
        }
        @if !dashboard.columns.is_empty() {
            div.columns {
                @for column in &dashboard.columns {
                    div.column {
                        @for card in column {
                            (render_card(card))
                        }
                    }
                }
            }
        }
        @for chart in &dashboard.charts {
            (render_chart(chart))
        }
        @for table in &dashboard.tables {
            (render_table(table))
        }
    }
}

fn granularity_select(current: Granularity) -> Markup {
    html! {
        form method="get" action="/" {
            (hidden_selection(SubSection::Production))
            label {
                "Afficher les données par : "
                select name="granularity" onchange="this.form.submit()" {
                    @for granularity in Granularity::ALL {
                        option value=(granularity.slug()) selected[granularity == current] {
                            (granularity.label())
                        }
                    }
                }
            }
            noscript { button type="submit" { "OK" } }
        }
    }
}

/// Titled, colored metric tile.
pub fn render_card(card: &Card) -> Markup {
    let tile = format!(
        "border-radius: 12px; padding: 20px; margin-bottom: 10px; background-color: {}; box-shadow: 0 2px 5px rgba(0,0,0,0.1);",
        card.background
    );
    html! {
        div style=(tile) {
            h4 style=(format!("margin-bottom:5px; color:{}", card.foreground)) { (card.title) }
            h3 style=(format!("margin-top: 0px; color:{}", card.foreground)) { (card.value) }
        }
    }
}

fn render_chart(chart: &ChartData) -> Markup {
    let dom_id = format!("chart-{}", chart.id);
    // figure JSON sits inside <script>, so no "</" may survive
    let figure = chart_to_figure(chart).to_string().replace("</", "<\\/");
    let dom_id_json = serde_json::Value::from(dom_id.as_str()).to_string();
    let script = format!(
        "(function () {{ var fig = {}; Plotly.newPlot({}, fig.data, fig.layout, {{responsive: true}}); }})();",
        figure, dom_id_json
    );
    html! {
        h2 { (chart.heading) }
        div id=(dom_id) {}
        script { (PreEscaped(script)) }
    }
}

fn render_table(table: &DataTable) -> Markup {
    html! {
        details {
            summary { (table.summary) }
            table {
                thead {
                    tr {
                        @for column in &table.columns {
                            th { (column) }
                        }
                    }
                }
                tbody {
                    @for row in &table.rows {
                        tr {
                            @for cell in row {
                                td { (cell) }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::DeviceRange;
    use chrono::{NaiveDate, NaiveTime};

    fn range() -> DeviceRange {
        DeviceRange::from_parts(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_page_link() {
        assert_eq!(page_link(&[]), "/");
        assert_eq!(
            page_link(&[("section", "dashboard"), ("sub", "device")]),
            "/?section=dashboard&sub=device"
        );
        assert_eq!(page_link(&[("q", "a b")]), "/?q=a%20b");
    }

    #[test]
    fn test_dashboard_entry_opens_first_sub_section() {
        assert_eq!(section_link(MainSection::Dashboard), "/?section=dashboard&sub=device");
        assert_eq!(section_link(MainSection::Kpi), "/?section=kpi");

        let html = render_page(&Dashboard::empty(View::Kpi));
        assert!(html.contains("<a href=\"/?section=dashboard&amp;sub=device\">🏠 Tableau de bord</a>"));
    }

    #[test]
    fn test_card_markup() {
        let card = Card::new("⚡ Énergie", "234.7", "#FFD700").with_foreground("#000000");
        let html = render_card(&card).into_string();
        assert!(html.contains("background-color: #FFD700"));
        assert!(html.contains("color:#000000\">⚡ Énergie</h4>"));
        assert!(html.contains(">234.7</h3>"));
    }

    #[test]
    fn test_card_text_is_escaped() {
        let html = render_card(&Card::new("<b>Titre</b>", "1 & 2", "#000000")).into_string();
        assert!(html.contains("&lt;b&gt;Titre&lt;/b&gt;"));
        assert!(html.contains("1 &amp; 2"));
    }

    #[test]
    fn test_awaiting_selection_shows_only_menus() {
        let html = render_page(&Dashboard::empty(View::AwaitingSelection));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Sous-section"));
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("plotly"));
        assert!(!html.contains("class=\"selected\">📡"));
    }

    #[test]
    fn test_device_sidebar_has_range_form() {
        let html = render_page(&Dashboard::empty(View::Device(range())));
        assert!(html.contains("name=\"start_date\" value=\"2025-06-01\""));
        assert!(html.contains("name=\"end_time\" value=\"18:00\""));
        assert!(html.contains("class=\"selected\">📡 Dispositif</a>"));
    }

    #[test]
    fn test_placeholder_section_hides_sub_menu() {
        let mut dashboard = Dashboard::empty(View::Employees);
        dashboard.title = Some("👥 Gestion des employés".to_string());
        dashboard.info = Some("Liste des utilisateurs".to_string());
        let html = render_page(&dashboard);
        assert!(!html.contains("Sous-section"));
        assert!(html.contains("<div class=\"info\">Liste des utilisateurs</div>"));
        assert!(html.contains("class=\"selected\">👥 Employés</a>"));
    }

    #[test]
    fn test_table_cells_are_escaped() {
        let html = render_table(&DataTable {
            summary: "Données".to_string(),
            columns: vec!["Date".to_string()],
            rows: vec![vec!["<script>".to_string()]],
        })
        .into_string();
        assert!(html.contains("<td>&lt;script&gt;</td>"));
        assert!(html.starts_with("<details><summary>Données</summary>"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error_page("bad <value>");
        assert!(html.contains("<pre>bad &lt;value&gt;</pre>"));
    }
}
