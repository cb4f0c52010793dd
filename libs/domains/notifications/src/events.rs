//! Well-known platform events.
//!
//! Constructors for the dispatch events the rest of the platform raises:
//! new reviews, comments, and healed-photo reminders. Titles, messages,
//! action links, and metadata shapes follow what the product shows users.

use serde_json::json;
use uuid::Uuid;

use crate::models::{Category, DispatchEvent, UserType};

/// What a comment was left on, for routing the action link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Review(Uuid),
    PortfolioImage,
}

impl DispatchEvent {
    /// Notify an artist about a new review of their work.
    pub fn review_received(artist_id: Uuid, review_id: Uuid, overall_rating: u8) -> Self {
        DispatchEvent::new(
            artist_id,
            UserType::Artist,
            "New Review",
            format!(
                "You received a new review with an overall rating of {}/10.",
                overall_rating
            ),
            Category::Review,
        )
        .with_action_link(format!("/artist/dashboard/review/{}", review_id))
        .with_metadata(json!({
            "review_id": review_id,
            "rating": overall_rating,
        }))
    }

    /// Notify a user that someone commented on their review or portfolio image.
    pub fn comment_received(
        recipient_id: Uuid,
        recipient_type: UserType,
        comment_id: Uuid,
        target: CommentTarget,
    ) -> Self {
        let (noun, action_link, comment_type) = match target {
            CommentTarget::Review(review_id) => (
                "review",
                format!("/review/{}", review_id),
                "review",
            ),
            CommentTarget::PortfolioImage => (
                "portfolio image",
                "/artist/dashboard?tab=portfolio".to_string(),
                "portfolio_image",
            ),
        };

        DispatchEvent::new(
            recipient_id,
            recipient_type,
            "New Comment",
            format!("Someone commented on your {}.", noun),
            Category::Comment,
        )
        .with_action_link(action_link)
        .with_metadata(json!({
            "comment_id": comment_id,
            "comment_type": comment_type,
        }))
    }

    /// Remind a client to upload a healed photo of their tattoo.
    pub fn healed_photo_reminder(client_id: Uuid, review_id: Uuid, timeframe: &str) -> Self {
        DispatchEvent::new(
            client_id,
            UserType::Client,
            "Healed Tattoo Photo Reminder",
            format!(
                "It's been {} since your tattoo. Time to upload a healed photo!",
                timeframe
            ),
            Category::HealedPhoto,
        )
        .with_action_link(format!("/review/{}/upload-healed", review_id))
        .with_metadata(json!({
            "review_id": review_id,
            "timeframe": timeframe,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_event_shape() {
        let artist_id = Uuid::new_v4();
        let review_id = Uuid::new_v4();
        let event = DispatchEvent::review_received(artist_id, review_id, 9);

        assert_eq!(event.user_id, artist_id);
        assert_eq!(event.user_type, UserType::Artist);
        assert_eq!(event.category, Category::Review);
        assert_eq!(event.title, "New Review");
        assert!(event.message.contains("9/10"));
        assert_eq!(
            event.action_link.as_deref(),
            Some(format!("/artist/dashboard/review/{}", review_id).as_str())
        );
        assert_eq!(
            event.metadata.as_ref().unwrap()["rating"],
            serde_json::json!(9)
        );
    }

    #[test]
    fn comment_event_routes_by_target() {
        let review_id = Uuid::new_v4();
        let on_review = DispatchEvent::comment_received(
            Uuid::new_v4(),
            UserType::Client,
            Uuid::new_v4(),
            CommentTarget::Review(review_id),
        );
        assert!(on_review.message.contains("your review"));
        assert_eq!(
            on_review.action_link.as_deref(),
            Some(format!("/review/{}", review_id).as_str())
        );

        let on_portfolio = DispatchEvent::comment_received(
            Uuid::new_v4(),
            UserType::Artist,
            Uuid::new_v4(),
            CommentTarget::PortfolioImage,
        );
        assert!(on_portfolio.message.contains("portfolio image"));
        assert_eq!(
            on_portfolio.action_link.as_deref(),
            Some("/artist/dashboard?tab=portfolio")
        );
    }

    #[test]
    fn healed_photo_event_targets_client() {
        let event = DispatchEvent::healed_photo_reminder(Uuid::new_v4(), Uuid::new_v4(), "1 month");
        assert_eq!(event.user_type, UserType::Client);
        assert_eq!(event.category, Category::HealedPhoto);
        assert!(event.message.contains("1 month"));
    }
}
