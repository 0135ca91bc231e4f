use eframe::egui;

/// Builder for drag values with optional range, suffix and speed
pub struct DragValueBuilder<'a, T> {
    value: &'a mut T,
    range: Option<std::ops::RangeInclusive<T>>,
    suffix: Option<String>,
    speed: Option<f32>,
}

impl<'a, T> DragValueBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T) -> Self {
        Self {
            value,
            range: None,
            suffix: None,
            speed: None,
        }
    }

    pub fn range(mut self, range: std::ops::RangeInclusive<T>) -> Self {
        self.range = Some(range);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut drag = egui::DragValue::new(self.value);

        if let Some(range) = self.range {
            drag = drag.range(range);
        }

        if let Some(suffix) = self.suffix {
            drag = drag.suffix(suffix);
        }

        if let Some(speed) = self.speed {
            drag = drag.speed(speed);
        }

        ui.add(drag).changed()
    }
}

/// Two labelled inch values on one row, e.g. width and height
pub fn inch_pair(
    ui: &mut egui::Ui,
    label: &str,
    width: &mut f32,
    height: &mut f32,
    range: std::ops::RangeInclusive<f32>,
) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut changed = DragValueBuilder::new(width)
            .range(range.clone())
            .suffix(" in")
            .speed(0.01)
            .show(ui);
        ui.label("×");
        changed |= DragValueBuilder::new(height)
            .range(range)
            .suffix(" in")
            .speed(0.01)
            .show(ui);
        changed
    })
    .inner
}

/// Preset picker using ComboBox; returns the picked value, if any
pub fn preset_selector<T>(ui: &mut egui::Ui, id: &str, options: &[(T, &str)]) -> Option<T>
where
    T: PartialEq + Copy,
{
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text("Preset")
        .show_ui(ui, |ui| {
            for (value, text) in options {
                ui.selectable_value(&mut picked, Some(*value), *text);
            }
        });
    picked
}
