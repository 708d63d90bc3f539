use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

use super::Timestamp;

/// Declares a wire enum that travels as an integer code in JSON bodies and
/// path segments, and as its symbolic server name in query strings.
///
/// Decoding is strict: an integer outside the declared codes is an error, so
/// a record carrying one fails to decode and the enclosing envelope becomes
/// an invalid-response envelope.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $expecting:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant in code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Integer code used in JSON bodies and path segments.
            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Looks up a variant by integer code; `None` for undeclared codes.
            #[must_use]
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Symbolic server name used in query strings.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = &'static str;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(value))
                    .ok_or(concat!("unknown ", $expecting))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct CodeVisitor;

                impl de::Visitor<'_> for CodeVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                        formatter.write_str(concat!("a ", $expecting, " code or name"))
                    }

                    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                        $name::from_code(value).ok_or_else(|| {
                            E::custom(format!(concat!("unknown ", $expecting, " code {}"), value))
                        })
                    }

                    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                        i64::try_from(value)
                            .ok()
                            .and_then($name::from_code)
                            .ok_or_else(|| {
                                E::custom(format!(concat!("unknown ", $expecting, " code {}"), value))
                            })
                    }

                    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                        value.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(CodeVisitor)
            }
        }
    };
}

coded_enum! {
    /// Lifecycle state of a task.
    TaskStatus, "task status" {
        /// Not started.
        #[default]
        Pending = 1 => "Pendente",
        /// Being worked on.
        InProgress = 2 => "EmAndamento",
        /// Finished.
        Done = 3 => "Concluida",
        /// Abandoned.
        Cancelled = 4 => "Cancelada",
    }
}

coded_enum! {
    /// Urgency of a task.
    TaskPriority, "task priority" {
        /// Whenever convenient.
        Low = 1 => "Baixa",
        /// Default urgency.
        #[default]
        Medium = 2 => "Media",
        /// Ahead of normal work.
        High = 3 => "Alta",
        /// Drop everything.
        Critical = 4 => "Critica",
    }
}

/// Task record as returned by `api/tarefa`.
///
/// `is_overdue` and `is_done` are computed by the server and trusted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: i32,

    /// Short title.
    #[serde(rename = "titulo", default)]
    pub title: String,

    /// Free-form description.
    #[serde(rename = "descricao", default)]
    pub description: String,

    /// Lifecycle state.
    pub status: TaskStatus,

    /// Server-rendered label for `status`.
    #[serde(rename = "statusDescricao", default)]
    pub status_label: String,

    /// Urgency.
    #[serde(rename = "prioridade")]
    pub priority: TaskPriority,

    /// Server-rendered label for `priority`.
    #[serde(rename = "prioridadeDescricao", default)]
    pub priority_label: String,

    /// Deadline, if any.
    #[serde(rename = "dataVencimento", default)]
    pub due_date: Option<Timestamp>,

    /// When the task was marked done.
    #[serde(rename = "dataConclusao", default)]
    pub completed_at: Option<Timestamp>,

    /// Optional grouping label.
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,

    /// Owning tenant.
    #[serde(rename = "tenantId", default)]
    pub tenant_id: String,

    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    /// Last update time.
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<Timestamp>,

    /// Past its deadline and not done.
    #[serde(rename = "estaVencida", default)]
    pub is_overdue: bool,

    /// In the done state.
    #[serde(rename = "estaConcluida", default)]
    pub is_done: bool,
}

/// Body of `POST api/tarefa`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTask {
    /// Short title.
    #[serde(rename = "titulo")]
    pub title: String,

    /// Free-form description.
    #[serde(rename = "descricao")]
    pub description: String,

    /// Urgency, medium unless chosen.
    #[serde(rename = "prioridade")]
    pub priority: TaskPriority,

    /// Deadline, if any.
    #[serde(rename = "dataVencimento")]
    pub due_date: Option<Timestamp>,

    /// Optional grouping label.
    #[serde(rename = "categoria")]
    pub category: Option<String>,

    /// Initial state.
    pub status: TaskStatus,
}

/// Body of `PUT api/tarefa/{id}`; replaces every editable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTask {
    /// Short title.
    #[serde(rename = "titulo")]
    pub title: String,

    /// Free-form description.
    #[serde(rename = "descricao")]
    pub description: String,

    /// Urgency.
    #[serde(rename = "prioridade")]
    pub priority: TaskPriority,

    /// Deadline, if any.
    #[serde(rename = "dataVencimento")]
    pub due_date: Option<Timestamp>,

    /// Optional grouping label.
    #[serde(rename = "categoria")]
    pub category: Option<String>,

    /// New state.
    pub status: TaskStatus,
}

impl From<Task> for UpdateTask {
    fn from(task: Task) -> Self {
        Self {
            title: task.title,
            description: task.description,
            priority: task.priority,
            due_date: task.due_date,
            category: task.category,
            status: task.status,
        }
    }
}

/// Body of `PATCH api/tarefa/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTaskStatus {
    /// Target state.
    pub status: TaskStatus,
}

/// Query for `GET api/tarefa/filtros`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks in this state.
    pub status: Option<TaskStatus>,
    /// Only tasks with this urgency.
    pub priority: Option<TaskPriority>,
    /// Only tasks in this category.
    pub category: Option<String>,
    /// Earliest deadline, inclusive.
    pub due_from: Option<NaiveDate>,
    /// Latest deadline, inclusive.
    pub due_until: Option<NaiveDate>,
    /// Include soft-deleted tasks.
    pub include_deleted: bool,
    /// Server-side ordering key.
    pub order_by: String,
    /// Free-text search over title and description.
    pub search_term: Option<String>,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            category: None,
            due_from: None,
            due_until: None,
            include_deleted: false,
            order_by: "CreatedAt".to_string(),
            search_term: None,
        }
    }
}

impl TaskFilter {
    /// Restricts to one state.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one urgency.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to one category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts deadlines to `from..=until`; either end may be open.
    #[must_use]
    pub fn with_due_range(mut self, from: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.due_from = from;
        self.due_until = until;
        self
    }

    /// Adds a free-text search term.
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Includes or excludes soft-deleted tasks.
    #[must_use]
    pub fn including_deleted(mut self, include_deleted: bool) -> Self {
        self.include_deleted = include_deleted;
        self
    }

    /// Changes the ordering key.
    #[must_use]
    pub fn ordered_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Renders the filter as a query string, without the leading `?`.
    ///
    /// Parameter order is fixed; `includeDeleted` and `orderBy` are always
    /// present. Enum values use their symbolic names.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();

        if let Some(status) = self.status {
            params.push(format!("status={status}"));
        }
        if let Some(priority) = self.priority {
            params.push(format!("prioridade={priority}"));
        }
        if let Some(category) = self.category.as_deref().filter(|value| !value.is_empty()) {
            params.push(format!("categoria={}", urlencoding::encode(category)));
        }
        if let Some(from) = self.due_from {
            params.push(format!("dataVencimentoInicio={}", from.format("%Y-%m-%d")));
        }
        if let Some(until) = self.due_until {
            params.push(format!("dataVencimentoFim={}", until.format("%Y-%m-%d")));
        }
        if let Some(term) = self.search_term.as_deref().filter(|value| !value.is_empty()) {
            params.push(format!("searchTerm={}", urlencoding::encode(term)));
        }

        params.push(format!("includeDeleted={}", self.include_deleted));
        params.push(format!("orderBy={}", self.order_by));

        params.join("&")
    }
}
