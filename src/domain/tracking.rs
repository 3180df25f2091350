use super::order::Order;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Milestone stages every shipment passes through, with display locations.
const STAGES: [(&str, &str); 5] = [
    ("Order Confirmed", "Warehouse"),
    ("Picked & Packed", "Warehouse"),
    ("In Transit", "Local Distribution Center"),
    ("Out for Delivery", "Your City"),
    ("Delivered", "Your Address"),
];

/// One milestone in a tracking view. `at` is `None` for stages that have
/// not been reached yet.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct TrackingEvent {
    pub stage: String,
    pub location: String,
    pub at: Option<DateTime<Utc>>,
}

/// A presentation-ready delivery-progress view.
///
/// This is a simulation, not carrier data: the milestones are spread
/// evenly across the shipping method's promised window, so the whole view
/// is a deterministic function of the order and the observation instant.
/// Never persisted; synthesized on demand.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct TrackingInfo {
    pub tracking_id: String,
    pub current_stage: String,
    pub estimated_delivery: DateTime<Utc>,
    pub events: Vec<TrackingEvent>,
}

impl TrackingInfo {
    /// Synthesizes the tracking view for `order` as observed at `now`.
    ///
    /// Milestones sit at 0, 1/4, 1/2, 3/4 and the full promised window
    /// after order creation. Stages due at or before `now` carry their
    /// timestamp; later ones are upcoming.
    pub fn synthesize(order: &Order, now: DateTime<Utc>) -> Self {
        let window = order.shipping_method.delivery_window();
        let due = [
            order.created_at,
            order.created_at + window / 4,
            order.created_at + window / 2,
            order.created_at + window * 3 / 4,
            order.created_at + window,
        ];

        let events: Vec<TrackingEvent> = STAGES
            .iter()
            .zip(due)
            .map(|(&(stage, location), at)| TrackingEvent {
                stage: stage.to_string(),
                location: location.to_string(),
                at: (at <= now).then_some(at),
            })
            .collect();

        let current_stage = events
            .iter()
            .rev()
            .find(|e| e.at.is_some())
            .map_or_else(|| STAGES[0].0.to_string(), |e| e.stage.clone());

        Self {
            tracking_id: order.tracking_id.clone(),
            current_stage,
            estimated_delivery: order.estimated_delivery,
            events,
        }
    }
}
