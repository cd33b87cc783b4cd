use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// One row of the participant sheet. `name` is the identifier the drawing
/// works with; the rest is only needed to deliver the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
        }
    }
}

/// Giver -> recipient mapping produced by a drawing.
///
/// Every giver appears exactly once as a key and exactly once as a value, and
/// nobody is mapped to themselves. Iteration follows the order in which the
/// givers were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<T: Eq + Hash> {
    givers: Vec<T>,
    recipients: HashMap<T, T>,
}

impl<T: Eq + Hash + Clone> Assignment<T> {
    /// `targets[i]` is the recipient of `givers[i]`. Callers guarantee the
    /// pairing is a derangement.
    pub(crate) fn from_targets(givers: &[T], targets: &[usize]) -> Self {
        let recipients = givers
            .iter()
            .zip(targets)
            .map(|(giver, &target)| (giver.clone(), givers[target].clone()))
            .collect();

        Self {
            givers: givers.to_vec(),
            recipients,
        }
    }

    pub fn get(&self, giver: &T) -> Option<&T> {
        self.recipients.get(giver)
    }

    pub fn len(&self) -> usize {
        self.givers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.givers.is_empty()
    }

    pub fn givers(&self) -> &[T] {
        &self.givers
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.givers
            .iter()
            .filter_map(move |giver| self.recipients.get(giver).map(|r| (giver, r)))
    }

    pub fn into_map(self) -> HashMap<T, T> {
        self.recipients
    }
}

/// What the SMS gateway answered for a delivered message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub status: u16,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub giver: String,
    pub phone: String,
    pub status: DeliveryStatus,
}

/// Outcome of one drawing event. Deliberately does not carry the assignment
/// itself so it can be printed or logged without spoiling anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SorteoReport {
    pub drawn_at: chrono::DateTime<chrono::Utc>,
    pub participants: usize,
    pub attempts: usize,
    pub deliveries: Vec<Delivery>,
}

impl SorteoReport {
    pub fn sent(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::Sent))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::Skipped))
    }

    fn count(&self, pred: impl Fn(&DeliveryStatus) -> bool) -> usize {
        self.deliveries.iter().filter(|d| pred(&d.status)).count()
    }
}
