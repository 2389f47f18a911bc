use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority. Lower rank sorts first in the active table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "urgent-important")]
    UrgentImportant,
    #[serde(rename = "urgent")]
    Urgent,
    #[serde(rename = "important")]
    Important,
    #[serde(rename = "routine")]
    Routine,
}

impl Priority {
    /// All priorities in form/select order (highest severity first)
    pub const ALL: [Priority; 4] = [
        Priority::UrgentImportant,
        Priority::Urgent,
        Priority::Important,
        Priority::Routine,
    ];

    /// Severity rank used as the primary active-table sort key
    pub fn rank(self) -> u8 {
        match self {
            Priority::UrgentImportant => 1,
            Priority::Urgent => 2,
            Priority::Important => 3,
            Priority::Routine => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::UrgentImportant => "urgent+important",
            Priority::Urgent => "urgent",
            Priority::Important => "important",
            Priority::Routine => "routine",
        }
    }
}

/// Task progress state. All transitions are permitted; the only coupled
/// effect is the one-way `completed_at` stamp on entry to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Stuck,
    Done,
}

impl Status {
    /// All statuses in form/select order
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Stuck,
        Status::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Stuck => "stuck",
            Status::Done => "done",
        }
    }
}

/// A single work item.
///
/// Field order matches the on-disk JSON document. Every value serializes as
/// a string; absent dates and timestamps serialize as empty strings, not null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, assigned at creation, immutable
    pub id: String,
    /// Creation timestamp, immutable
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    pub priority: Priority,
    /// Non-empty; enforced at mutation time by the store
    pub summary: String,
    pub status: Status,
    /// Free text; empty means unassigned
    #[serde(default)]
    pub assignee: String,
    /// Optional date, no time component
    #[serde(with = "opt_date", default)]
    pub deadline: Option<NaiveDate>,
    /// Free text; empty means no remark
    #[serde(default)]
    pub remark: String,
    /// Stamped the first time status transitions to done; never auto-cleared
    #[serde(with = "opt_timestamp", default)]
    pub completed_at: Option<NaiveDateTime>,
}

/// Caller-supplied fields for a new task (the add form)
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub summary: String,
    pub assignee: String,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub deadline: Option<NaiveDate>,
    pub remark: String,
}

impl Task {
    /// Construct a task from a draft with a fresh id and `created_at = now`.
    /// Does not validate the summary; the store does that.
    pub fn from_draft(draft: TaskDraft) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            created_at: now(),
            priority: draft.priority.unwrap_or(Priority::UrgentImportant),
            summary: draft.summary,
            status: draft.status.unwrap_or(Status::Todo),
            assignee: draft.assignee,
            deadline: draft.deadline,
            remark: draft.remark,
            completed_at: None,
        }
    }

    pub fn created_display(&self) -> String {
        format_mmdd(self.created_at.date())
    }

    pub fn deadline_display(&self) -> String {
        self.deadline.map(format_mmdd).unwrap_or_default()
    }

    pub fn completed_display(&self) -> String {
        self.completed_at
            .map(|ts| format_mmdd(ts.date()))
            .unwrap_or_default()
    }
}

/// Current local time, truncated to whole seconds (the wire resolution)
pub fn now() -> NaiveDateTime {
    let ts = Local::now().naive_local();
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// MM-DD short form used in table cells
pub fn format_mmdd(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

/// One-keystroke deadline presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickDeadline {
    Tomorrow,
    /// This week's Friday; today if today is Friday
    Friday,
    /// Next week's Monday; a full week away if today is Monday
    NextMonday,
}

impl QuickDeadline {
    pub fn label(self) -> &'static str {
        match self {
            QuickDeadline::Tomorrow => "tomorrow",
            QuickDeadline::Friday => "Friday",
            QuickDeadline::NextMonday => "next Monday",
        }
    }

    /// Resolve the preset relative to `from`
    pub fn resolve(self, from: NaiveDate) -> NaiveDate {
        // 0 = Sunday .. 6 = Saturday
        let day = from.weekday().num_days_from_sunday() as i64;
        let diff = match self {
            QuickDeadline::Tomorrow => 1,
            QuickDeadline::Friday => {
                if day <= 5 {
                    5 - day
                } else {
                    5 + 7 - day
                }
            }
            QuickDeadline::NextMonday => {
                if day == 1 {
                    7
                } else {
                    (8 - day) % 7
                }
            }
        };
        from + Duration::days(diff)
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a wire timestamp. Accepts second and sub-second precision, with or
/// without a trailing `Z`, and the minute-precision form.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&ts.format(super::TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(de)?;
        super::parse_timestamp(&s)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {s:?}")))
    }
}

mod opt_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        ts: &Option<NaiveDateTime>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => ser.serialize_str(&ts.format(super::TIMESTAMP_FORMAT).to_string()),
            None => ser.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let s = String::deserialize(de)?;
        if s.is_empty() {
            return Ok(None);
        }
        super::parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {s:?}")))
    }
}

mod opt_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, ser: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => ser.serialize_str(&date.format(super::DATE_FORMAT).to_string()),
            None => ser.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
        let s = String::deserialize(de)?;
        if s.is_empty() {
            return Ok(None);
        }
        super::parse_date(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_task() -> Task {
        Task {
            id: "t-1".into(),
            created_at: parse_timestamp("2024-06-10T09:00:00").unwrap(),
            priority: Priority::Urgent,
            summary: "Ship the release".into(),
            status: Status::Todo,
            assignee: String::new(),
            deadline: None,
            remark: String::new(),
            completed_at: None,
        }
    }

    #[test]
    fn priority_ranks_are_ordered() {
        assert_eq!(Priority::UrgentImportant.rank(), 1);
        assert_eq!(Priority::Urgent.rank(), 2);
        assert_eq!(Priority::Important.rank(), 3);
        assert_eq!(Priority::Routine.rank(), 4);
    }

    #[test]
    fn wire_format_uses_empty_strings_for_absent_values() {
        let json = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(json["assignee"], "");
        assert_eq!(json["deadline"], "");
        assert_eq!(json["remark"], "");
        assert_eq!(json["completed_at"], "");
        assert_eq!(json["created_at"], "2024-06-10T09:00:00");
        assert_eq!(json["priority"], "urgent");
        assert_eq!(json["status"], "todo");
    }

    #[test]
    fn wire_format_round_trips() {
        let mut task = sample_task();
        task.deadline = Some(date("2024-06-14"));
        task.status = Status::Done;
        task.completed_at = parse_timestamp("2024-06-11T09:00:00");
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn deserializes_all_enum_wire_names() {
        for (wire, status) in [
            ("todo", Status::Todo),
            ("in-progress", Status::InProgress),
            ("stuck", Status::Stuck),
            ("done", Status::Done),
        ] {
            let parsed: Status = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
            assert_eq!(parsed, status);
        }
        for (wire, priority) in [
            ("urgent-important", Priority::UrgentImportant),
            ("urgent", Priority::Urgent),
            ("important", Priority::Important),
            ("routine", Priority::Routine),
        ] {
            let parsed: Priority = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
            assert_eq!(parsed, priority);
        }
    }

    #[test]
    fn parse_timestamp_accepts_common_forms() {
        assert!(parse_timestamp("2024-06-10T09:00:00").is_some());
        assert!(parse_timestamp("2024-06-10T09:00:00.000Z").is_some());
        assert!(parse_timestamp("2024-06-09T10:00").is_some());
        assert!(parse_timestamp("not a time").is_none());
    }

    #[test]
    fn from_draft_assigns_identity_and_leaves_completion_empty() {
        let a = Task::from_draft(TaskDraft {
            summary: "one".into(),
            ..Default::default()
        });
        let b = Task::from_draft(TaskDraft {
            summary: "two".into(),
            ..Default::default()
        });
        assert_ne!(a.id, b.id);
        assert!(a.completed_at.is_none());
        assert_eq!(a.status, Status::Todo);
        assert_eq!(a.priority, Priority::UrgentImportant);
    }

    #[test]
    fn quick_deadline_tomorrow() {
        assert_eq!(
            QuickDeadline::Tomorrow.resolve(date("2024-06-10")),
            date("2024-06-11")
        );
    }

    #[test]
    fn quick_deadline_friday() {
        // Monday → the coming Friday
        assert_eq!(
            QuickDeadline::Friday.resolve(date("2024-06-10")),
            date("2024-06-14")
        );
        // Friday resolves to itself
        assert_eq!(
            QuickDeadline::Friday.resolve(date("2024-06-14")),
            date("2024-06-14")
        );
        // Saturday rolls over to next week's Friday
        assert_eq!(
            QuickDeadline::Friday.resolve(date("2024-06-15")),
            date("2024-06-21")
        );
    }

    #[test]
    fn quick_deadline_next_monday() {
        // Monday → a full week away
        assert_eq!(
            QuickDeadline::NextMonday.resolve(date("2024-06-10")),
            date("2024-06-17")
        );
        // Sunday → the very next day
        assert_eq!(
            QuickDeadline::NextMonday.resolve(date("2024-06-09")),
            date("2024-06-10")
        );
        // Wednesday → the coming Monday
        assert_eq!(
            QuickDeadline::NextMonday.resolve(date("2024-06-12")),
            date("2024-06-17")
        );
    }

    #[test]
    fn format_mmdd_pads() {
        assert_eq!(format_mmdd(date("2024-06-09")), "06-09");
        assert_eq!(format_mmdd(date("2024-11-28")), "11-28");
    }
}
