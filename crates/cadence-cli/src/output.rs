//! Output formatting

use cadence_schedule::{Frontier, Instruction, Operation, ScheduleView};
use serde_json::{json, Map, Value};

/// Output builder for formatted CLI output
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a count field to the output
    pub fn field_usize(mut self, key: &str, value: usize) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add a JSON value field to the output
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    /// Print the output
    pub fn print(self) {
        if self.json_mode {
            let json = Value::Object(self.fields);
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        } else if let Some(msg) = self.message {
            println!("{}", msg);
        }
    }
}

fn op_json(op: &Instruction) -> Value {
    let resources: Vec<String> = op.resources().iter().map(|r| r.to_string()).collect();
    let mut value = json!({
        "name": op.name(),
        "resources": resources,
    });
    if let Some(nested) = op.as_nested_schedule() {
        value["body"] = schedule_json(nested);
    }
    value
}

/// Slots as a JSON array of operation arrays
pub fn schedule_json(schedule: &impl ScheduleView<Instruction>) -> Value {
    Value::Array(
        schedule
            .slots()
            .iter()
            .map(|slot| Value::Array(slot.iter().map(op_json).collect()))
            .collect(),
    )
}

/// One line per slot: `  3: h(q0) cz(q1, q2)`
pub fn schedule_text(schedule: &impl ScheduleView<Instruction>) -> String {
    let width = schedule.len().saturating_sub(1).to_string().len();
    schedule
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let ops: Vec<String> = slot.iter().map(|op| op.to_string()).collect();
            format!("  {:>width$}: {}", i, ops.join(" "), width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Frontier as a JSON object keyed by resource name
pub fn frontier_json(frontier: &Frontier) -> Value {
    Value::Object(
        frontier
            .iter()
            .map(|(r, &i)| (r.to_string(), Value::Number(i.into())))
            .collect(),
    )
}

/// Frontier as `q0=3, q1=5`
pub fn frontier_text(frontier: &Frontier) -> String {
    frontier
        .iter()
        .map(|(r, i)| format!("{}={}", r, i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_primitives::Resource;
    use cadence_schedule::{Schedule, TimeSlot};

    fn sample() -> Schedule<Instruction> {
        Schedule::from_slots(vec![
            TimeSlot::from_operations(vec![
                Instruction::on_lines("h", &[0]),
                Instruction::on_lines("x", &[1]),
            ])
            .unwrap(),
            TimeSlot::from_operations(vec![Instruction::on_lines("cz", &[0, 1])]).unwrap(),
        ])
    }

    #[test]
    fn test_schedule_text() {
        assert_eq!(schedule_text(&sample()), "  0: h(q0) x(q1)\n  1: cz(q0, q1)");
    }

    #[test]
    fn test_schedule_json() {
        let value = schedule_json(&sample());
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));
        assert_eq!(value[1][0]["name"], "cz");
        assert_eq!(value[1][0]["resources"], json!(["q0", "q1"]));
    }

    #[test]
    fn test_frontier_rendering() {
        let frontier = Frontier::from([(Resource::line(0), 3), (Resource::named("anc"), 1)]);
        assert_eq!(frontier_text(&frontier), "q0=3, anc=1");
        assert_eq!(frontier_json(&frontier)["anc"], 1);
    }
}
