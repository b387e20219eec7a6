//! Queue classification.
//!
//! Only ranked queues trigger refinement; every other queue id is
//! acknowledged and skipped.

/// Allow-list of queue ids that qualify for analytics.
#[derive(Debug, Clone)]
pub struct QueueFilter {
    ranked_queue_ids: Vec<i32>,
}

impl QueueFilter {
    pub fn new(ranked_queue_ids: Vec<i32>) -> Self {
        Self { ranked_queue_ids }
    }

    /// Returns true when the queue id is on the ranked allow-list.
    pub fn is_ranked(&self, queue_id: i32) -> bool {
        self.ranked_queue_ids.contains(&queue_id)
    }
}
