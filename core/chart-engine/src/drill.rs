//! FILENAME: core/chart-engine/src/drill.rs
//! PURPOSE: Drill-down state over a group section's dimension hierarchy.
//! CONTEXT: A drillable group section plots one hierarchy level at a time.
//! `ChartDrillOption` owns the levels, a cursor into them, and the trail of
//! values the user drilled through. It is plain owned state: the host keeps
//! one per chart and replaces it when the section's fields change.

use chart_dataset::{ChartDataConfig, ChartDataSectionField, ChartDataSectionType};
use chart_format::CellValue;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Fields plotted together at one drill level. Usually exactly one.
pub type DrillLevel = SmallVec<[ChartDataSectionField; 1]>;

/// A value the user drilled through, scoped to the field it was picked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillCondition {
    pub field: ChartDataSectionField,
    pub value: CellValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDrillOption {
    levels: Vec<DrillLevel>,
    cursor: usize,
    conditions: Vec<DrillCondition>,
}

impl ChartDrillOption {
    /// One level per field, cursor at the root.
    pub fn new(fields: &[ChartDataSectionField]) -> Self {
        ChartDrillOption {
            levels: fields.iter().cloned().map(|f| SmallVec::from_buf([f])).collect(),
            ..Default::default()
        }
    }

    /// Explicit levels; empty levels are dropped.
    pub fn from_levels(levels: Vec<Vec<ChartDataSectionField>>) -> Self {
        ChartDrillOption {
            levels: levels
                .into_iter()
                .filter(|level| !level.is_empty())
                .map(DrillLevel::from_vec)
                .collect(),
            ..Default::default()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn levels(&self) -> &[DrillLevel] {
        &self.levels
    }

    pub fn conditions(&self) -> &[DrillCondition] {
        &self.conditions
    }

    /// Fields of the level under the cursor.
    pub fn current_fields(&self) -> &[ChartDataSectionField] {
        self.levels
            .get(self.cursor)
            .map(|level| level.as_slice())
            .unwrap_or_default()
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &ChartDataSectionField> {
        self.levels.iter().flat_map(|level| level.iter())
    }

    pub fn is_drillable(&self) -> bool {
        self.levels.len() > 1
    }

    pub fn is_top_level(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_bottom_level(&self) -> bool {
        self.cursor + 1 >= self.levels.len()
    }

    /// Move one level down. Returns false at the last level.
    pub fn drill_down(&mut self) -> bool {
        if self.is_bottom_level() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move one level down, recording `value` against the current level's
    /// first field.
    pub fn drill_down_with(&mut self, value: CellValue) -> bool {
        let field = match self.current_fields().first() {
            Some(field) if !self.is_bottom_level() => field.clone(),
            _ => return false,
        };
        self.conditions.push(DrillCondition { field, value });
        self.drill_down()
    }

    /// Move one level up, discarding the condition recorded on the way down.
    pub fn drill_up(&mut self) -> bool {
        if self.is_top_level() {
            return false;
        }
        self.cursor -= 1;
        let cursor = self.cursor;
        let level_fields = &self.levels[cursor];
        if let Some(pos) = self
            .conditions
            .iter()
            .rposition(|condition| level_fields.iter().any(|f| f.same_column(&condition.field)))
        {
            self.conditions.truncate(pos);
        }
        true
    }

    /// Back to the root level with no conditions.
    pub fn roll_up(&mut self) {
        self.cursor = 0;
        self.conditions.clear();
    }
}

/// The group fields the chart should plot right now.
pub fn get_drillable_rows(
    sections: &[ChartDataConfig],
    option: Option<&ChartDrillOption>,
) -> Vec<ChartDataSectionField> {
    sections
        .iter()
        .filter(|section| section.is_type(ChartDataSectionType::Group))
        .flat_map(|section| {
            if !section.drillable {
                return section.rows.clone();
            }
            match option {
                Some(option) => {
                    let current = option.current_fields();
                    section
                        .rows
                        .iter()
                        .filter(|row| current.iter().any(|field| field.same_column(row)))
                        .cloned()
                        .collect()
                }
                None => section.rows.iter().take(1).cloned().collect(),
            }
        })
        .collect()
}
