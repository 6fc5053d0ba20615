use crate::domain::{Display, Mode};

/// One display's entry in an apply request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayArrangement {
    pub persistent_id: String,
    pub mode: Option<u32>,
    pub origin: (i32, i32),
}

impl DisplayArrangement {
    pub fn to_arg(&self) -> String {
        let mode = self
            .mode
            .map(|ordinal| ordinal.to_string())
            .unwrap_or_else(|| "-1".to_string());
        format!(
            "id:{} mode:{mode} origin:({},{}) degree:0",
            self.persistent_id, self.origin.0, self.origin.1
        )
    }
}

/// A full-set apply request: every display, with one of them switched to `mode`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplyPlan {
    pub target_index: usize,
    pub mode: Mode,
    pub arrangements: Vec<DisplayArrangement>,
}

impl ApplyPlan {
    pub fn args(&self) -> Vec<String> {
        self.arrangements
            .iter()
            .map(DisplayArrangement::to_arg)
            .collect()
    }
}

pub fn build_apply_plan(displays: &[Display], target_index: usize, mode: &Mode) -> ApplyPlan {
    let arrangements = displays
        .iter()
        .enumerate()
        .map(|(index, display)| DisplayArrangement {
            persistent_id: display.persistent_id.clone(),
            mode: if index == target_index {
                Some(mode.ordinal)
            } else {
                display.current_mode
            },
            origin: display.origin,
        })
        .collect();

    ApplyPlan {
        target_index,
        mode: mode.clone(),
        arrangements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(id: &str, origin: (i32, i32), current_mode: Option<u32>) -> Display {
        Display {
            persistent_id: id.to_string(),
            contextual_id: "1".to_string(),
            serial_id: "s1".to_string(),
            display_type: "Panel".to_string(),
            current_resolution: "1920x1080".to_string(),
            current_hertz: 60,
            origin,
            current_mode,
            modes: Vec::new(),
        }
    }

    #[test]
    fn plan_covers_every_display_and_keeps_origins() {
        let displays = vec![
            display("AAA", (0, 0), Some(3)),
            display("BBB", (-1920, 0), Some(11)),
        ];
        let mode = Mode {
            ordinal: 42,
            width: 2560,
            height: 1440,
            hertz: 60,
            color_depth: 8,
            hidpi: false,
        };

        let plan = build_apply_plan(&displays, 1, &mode);
        assert_eq!(
            plan.args(),
            vec![
                "id:AAA mode:3 origin:(0,0) degree:0",
                "id:BBB mode:42 origin:(-1920,0) degree:0",
            ]
        );
        assert_eq!(plan.target_index, 1);
    }

    #[test]
    fn unknown_active_mode_is_emitted_as_minus_one() {
        let arrangement = DisplayArrangement {
            persistent_id: "CCC".to_string(),
            mode: None,
            origin: (10, 20),
        };
        assert_eq!(arrangement.to_arg(), "id:CCC mode:-1 origin:(10,20) degree:0");
    }
}
