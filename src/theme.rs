use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub symbol_font_family: String,
    pub background: String,
    pub grid: String,
    pub critical_zone: String,
    pub critical_zone_edge: String,
    pub centerline: String,
    pub deck_fill: String,
    pub deck_stroke: String,
    pub tower_fill: String,
    pub tower_stroke: String,
    pub cable: String,
    pub cable_aura: String,
    pub hanger: String,
    pub compression: String,
    pub tension: String,
    pub roller_fill: String,
    pub roller_stroke: String,
    pub pin_fill: String,
    pub pin_stroke: String,
    pub pin_cross: String,
    pub cable_pull: String,
    pub reaction: String,
    pub energy_label: String,
    pub energy_caption: String,
    pub critical_label: String,
    pub deflection_label: String,
    pub mohr_panel: String,
    pub mohr_border: String,
    pub mohr_axis: String,
    pub mohr_circle: String,
    pub mohr_stress_point: String,
    pub mohr_principal: String,
    pub text: String,
    pub legend_panel: String,
}

impl Theme {
    /// Slate-on-paper palette of the default structural view.
    pub fn classic() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            symbol_font_family: "serif".to_string(),
            background: "#f0f4f8".to_string(),
            grid: "#e0e0e0".to_string(),
            critical_zone: "rgba(239, 68, 68, 0.3)".to_string(),
            critical_zone_edge: "rgba(239, 68, 68, 0)".to_string(),
            centerline: "#3b82f6".to_string(),
            deck_fill: "#94a3b8".to_string(),
            deck_stroke: "#475569".to_string(),
            tower_fill: "#64748b".to_string(),
            tower_stroke: "#334155".to_string(),
            cable: "#374151".to_string(),
            cable_aura: "rgba(250, 204, 21, 0.3)".to_string(),
            hanger: "#6b7280".to_string(),
            compression: "#3b82f6".to_string(),
            tension: "#dc2626".to_string(),
            roller_fill: "#0ea5e9".to_string(),
            roller_stroke: "#0284c7".to_string(),
            pin_fill: "#8b5cf6".to_string(),
            pin_stroke: "#7c3aed".to_string(),
            pin_cross: "#ffffff".to_string(),
            cable_pull: "#f59e0b".to_string(),
            reaction: "#10b981".to_string(),
            energy_label: "#eab308".to_string(),
            energy_caption: "#ca8a04".to_string(),
            critical_label: "#ef4444".to_string(),
            deflection_label: "#3b82f6".to_string(),
            mohr_panel: "rgba(255, 255, 255, 0.95)".to_string(),
            mohr_border: "#334155".to_string(),
            mohr_axis: "#64748b".to_string(),
            mohr_circle: "#8b5cf6".to_string(),
            mohr_stress_point: "#ef4444".to_string(),
            mohr_principal: "#059669".to_string(),
            text: "#1e293b".to_string(),
            legend_panel: "rgba(255, 255, 255, 0.8)".to_string(),
        }
    }

    /// White-on-navy drafting palette.
    pub fn blueprint() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            symbol_font_family: "serif".to_string(),
            background: "#0b2545".to_string(),
            grid: "#13315c".to_string(),
            critical_zone: "rgba(255, 107, 107, 0.35)".to_string(),
            critical_zone_edge: "rgba(255, 107, 107, 0)".to_string(),
            centerline: "#8da9c4".to_string(),
            deck_fill: "#1d4e89".to_string(),
            deck_stroke: "#eef4ed".to_string(),
            tower_fill: "#134074".to_string(),
            tower_stroke: "#eef4ed".to_string(),
            cable: "#eef4ed".to_string(),
            cable_aura: "rgba(255, 214, 102, 0.25)".to_string(),
            hanger: "#b8c5d6".to_string(),
            compression: "#7fc8f8".to_string(),
            tension: "#ff6b6b".to_string(),
            roller_fill: "#4cc9f0".to_string(),
            roller_stroke: "#eef4ed".to_string(),
            pin_fill: "#b197fc".to_string(),
            pin_stroke: "#eef4ed".to_string(),
            pin_cross: "#0b2545".to_string(),
            cable_pull: "#ffd166".to_string(),
            reaction: "#06d6a0".to_string(),
            energy_label: "#ffd166".to_string(),
            energy_caption: "#f4c95d".to_string(),
            critical_label: "#ff6b6b".to_string(),
            deflection_label: "#7fc8f8".to_string(),
            mohr_panel: "rgba(11, 37, 69, 0.95)".to_string(),
            mohr_border: "#eef4ed".to_string(),
            mohr_axis: "#8da9c4".to_string(),
            mohr_circle: "#b197fc".to_string(),
            mohr_stress_point: "#ff6b6b".to_string(),
            mohr_principal: "#06d6a0".to_string(),
            text: "#eef4ed".to_string(),
            legend_panel: "rgba(19, 49, 92, 0.85)".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "default" => Some(Self::classic()),
            "blueprint" => Some(Self::blueprint()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
