//! Dashboard landing view: counts and recent activity

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use vetkoto_app::dashboard::{ActivityKind, DashboardSummary};

use crate::theme::{palette, styles};

pub struct DashboardView<'a> {
    summary: Option<&'a DashboardSummary>,
    loading: bool,
}

impl<'a> DashboardView<'a> {
    pub fn new(summary: Option<&'a DashboardSummary>, loading: bool) -> Self {
        Self { summary, loading }
    }

    fn render_card(area: Rect, buf: &mut Buffer, label: &str, value: usize, color: Color) {
        let block = styles::glass_block(false).border_style(Style::default().fg(color));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label.to_string(), styles::text_secondary())),
        ];
        Paragraph::new(lines).centered().render(inner, buf);
    }

    fn activity_lines(summary: &DashboardSummary) -> Vec<Line<'static>> {
        match &summary.activity {
            Ok(items) if items.is_empty() => {
                vec![Line::from(Span::styled("No recent activity", styles::text_muted()))]
            }
            Ok(items) => items
                .iter()
                .map(|item| {
                    let (tag, color) = match item.kind {
                        ActivityKind::Visit => ("visit", palette::CARD_VISITS),
                        ActivityKind::Diagnosis => ("diag ", palette::STATUS_RED),
                        ActivityKind::Prescription => ("rx   ", palette::STATUS_BLUE),
                    };
                    Line::from(vec![
                        Span::styled(format!("{} ", tag), Style::default().fg(color)),
                        Span::styled(item.text.clone(), styles::text_primary()),
                    ])
                })
                .collect(),
            Err(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(palette::STATUS_RED),
            ))],
        }
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(summary) = self.summary else {
            let text = if self.loading {
                "Loading dashboard…"
            } else {
                "No data"
            };
            let block = styles::glass_block(false).title(" Dashboard ");
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled(text, styles::text_muted())).render(inner, buf);
            return;
        };

        let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);
        let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(rows[0]);

        Self::render_card(cards[0], buf, "Owners", summary.owners, palette::CARD_OWNERS);
        Self::render_card(cards[1], buf, "Patients", summary.patients, palette::CARD_PATIENTS);
        Self::render_card(cards[2], buf, "Visits", summary.visits, palette::CARD_VISITS);
        Self::render_card(
            cards[3],
            buf,
            "Upcoming vaccinations",
            summary.upcoming_vaccinations,
            palette::CARD_VACCINATIONS,
        );

        let block = styles::glass_block(false).title(" Recent activity ");
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);
        Paragraph::new(Self::activity_lines(summary)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use vetkoto_app::dashboard::{ActivityItem, ACTIVITY_FAILED};

    fn summary(activity: Result<Vec<ActivityItem>, String>) -> DashboardSummary {
        DashboardSummary {
            owners: 4,
            patients: 5,
            visits: 6,
            upcoming_vaccinations: 3,
            activity,
        }
    }

    #[test]
    fn test_dashboard_renders_counts_and_activity() {
        let summary = summary(Ok(vec![ActivityItem {
            kind: ActivityKind::Visit,
            text: "Visit for Rex on 2026-10-01".into(),
        }]));
        let mut term = TestTerminal::with_size(100, 20);
        term.render_widget(DashboardView::new(Some(&summary), false), term.area());

        assert!(term.buffer_contains("Owners"));
        assert!(term.buffer_contains("Upcoming vaccinations"));
        assert!(term.buffer_contains("Visit for Rex on 2026-10-01"));
    }

    #[test]
    fn test_activity_failure_message() {
        let summary = summary(Err(ACTIVITY_FAILED.to_string()));
        let mut term = TestTerminal::with_size(100, 20);
        term.render_widget(DashboardView::new(Some(&summary), false), term.area());

        assert!(term.buffer_contains(ACTIVITY_FAILED));
    }

    #[test]
    fn test_loading_placeholder() {
        let mut term = TestTerminal::new();
        term.render_widget(DashboardView::new(None, true), term.area());
        assert!(term.buffer_contains("Loading dashboard"));
    }
}
