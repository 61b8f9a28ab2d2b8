//! KPI Cards Widget
//! Summary cards computed once per table load.

use crate::charts::PRICE_INCREASE_DATE;
use crate::data::SalesTable;
use crate::stats::{format_currency, PriceImpact, SalesKpis};
use egui::{Color32, RichText};

const CARD_WIDTH: f32 = 200.0;

/// Row of KPI cards above the chart.
#[derive(Default)]
pub struct KpiPanel {
    pub kpis: Option<SalesKpis>,
    pub impact: Option<PriceImpact>,
}

impl KpiPanel {
    /// Recompute from a freshly loaded table. Empty tables show placeholders.
    pub fn from_table(table: &SalesTable) -> Self {
        Self {
            kpis: SalesKpis::compute(table).ok(),
            impact: PriceImpact::compute(table, PRICE_INCREASE_DATE).ok(),
        }
    }

    /// Caption/value pairs in display order.
    pub fn cards(&self) -> [(&'static str, String); 3] {
        let value = |pick: fn(&SalesKpis) -> f64| {
            self.kpis
                .as_ref()
                .map(|k| format_currency(pick(k)))
                .unwrap_or_else(|| "—".to_string())
        };

        [
            ("Total Sales", value(|k| k.total)),
            ("Avg Daily Sales", value(|k| k.average)),
            ("Peak Sales", value(|k| k.peak)),
        ]
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (caption, value) in self.cards() {
                Self::card(ui, caption, &value, None);
                ui.add_space(10.0);
            }

            if let Some(impact) = &self.impact {
                let change = impact.mean_change_pct();
                let color = if change >= 0.0 {
                    Color32::from_rgb(40, 167, 69)
                } else {
                    Color32::from_rgb(220, 53, 69)
                };
                let detail = format!(
                    "avg {} → {} (p = {:.4})",
                    format_currency(impact.before.mean),
                    format_currency(impact.after.mean),
                    impact.p_value
                );
                Self::card(ui, "Since Price Increase", &format!("{:+.1}%", change), Some((color, detail)));
            }
        });
    }

    fn card(ui: &mut egui::Ui, caption: &str, value: &str, extra: Option<(Color32, String)>) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(caption).size(14.0).color(Color32::GRAY));
                    let value_color = extra
                        .as_ref()
                        .map(|(c, _)| *c)
                        .unwrap_or_else(|| ui.visuals().strong_text_color());
                    ui.label(RichText::new(value).size(24.0).strong().color(value_color));
                    if let Some((_, detail)) = &extra {
                        ui.label(RichText::new(detail).size(11.0));
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Region, SalesRecord};
    use chrono::NaiveDate;

    #[test]
    fn test_cards_show_currency() {
        let date = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();
        let table = SalesTable::new(vec![
            SalesRecord { sales: 10.0, date: date(10), region: Region::North },
            SalesRecord { sales: 7.5, date: date(11), region: Region::East },
        ]);

        let panel = KpiPanel::from_table(&table);
        let cards = panel.cards();
        assert_eq!(cards[0], ("Total Sales", "$17.50".to_string()));
        assert_eq!(cards[1], ("Avg Daily Sales", "$8.75".to_string()));
        assert_eq!(cards[2], ("Peak Sales", "$10.00".to_string()));
        // Every row predates the price increase.
        assert!(panel.impact.is_none());
    }

    #[test]
    fn test_cards_on_empty_table() {
        let panel = KpiPanel::from_table(&SalesTable::default());
        assert!(panel.cards().iter().all(|(_, value)| value == "—"));
    }
}
