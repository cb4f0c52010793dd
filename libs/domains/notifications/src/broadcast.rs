//! Broadcast fanout: one announcement, many recipients.
//!
//! Enumerates the target user population and runs one router dispatch per
//! recipient with bounded concurrency. A single recipient failing never
//! aborts the fanout; ordering across recipients is not meaningful.

use futures::{StreamExt, stream};
use sea_orm::Iterable;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::NotificationResult;
use crate::models::{BroadcastRequest, BroadcastSummary, Category, DispatchEvent, UserType};
use crate::repository::{PreferenceRepository, UserDirectory};
use crate::router::NotificationRouter;

/// How many dispatches may be in flight at once during a fanout.
const FANOUT_CONCURRENCY: usize = 8;

/// Fans a system announcement out to every targeted user.
pub struct Broadcaster<P: PreferenceRepository, D: UserDirectory> {
    router: Arc<NotificationRouter<P>>,
    directory: Arc<D>,
}

impl<P: PreferenceRepository, D: UserDirectory> Broadcaster<P, D> {
    pub fn new(router: Arc<NotificationRouter<P>>, directory: Arc<D>) -> Self {
        Self { router, directory }
    }

    /// Send an announcement to all users of the target type, or to
    /// everyone when no type is given. Notifications carry the requested
    /// category, defaulting to `system`.
    ///
    /// Returns `Err` only when the request is malformed or the recipient
    /// enumeration itself fails; per-recipient dispatch errors are counted
    /// in the summary.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn broadcast(&self, request: BroadcastRequest) -> NotificationResult<BroadcastSummary> {
        request.validate()?;

        let user_types: Vec<UserType> = match request.target_user_type {
            Some(user_type) => vec![user_type],
            None => UserType::iter().collect(),
        };

        let mut recipients: Vec<(Uuid, UserType)> = Vec::new();
        for user_type in user_types {
            let ids = self.directory.user_ids(user_type).await?;
            recipients.extend(ids.into_iter().map(|id| (id, user_type)));
        }

        let total_attempted = recipients.len();
        let category = request.category.unwrap_or(Category::System);

        let results: Vec<bool> = stream::iter(recipients)
            .map(|(user_id, user_type)| {
                let router = Arc::clone(&self.router);
                let event = DispatchEvent::new(
                    user_id,
                    user_type,
                    request.title.clone(),
                    request.message.clone(),
                    category,
                );
                let event = match &request.action_link {
                    Some(link) => event.with_action_link(link.clone()),
                    None => event,
                };
                async move {
                    match router.dispatch(event).await {
                        Ok(outcome) => outcome.sent,
                        Err(e) => {
                            warn!(
                                user_id = %user_id,
                                user_type = %user_type,
                                error = %e,
                                "Broadcast dispatch failed"
                            );
                            false
                        }
                    }
                }
            })
            .buffer_unordered(FANOUT_CONCURRENCY)
            .collect()
            .await;

        let total_sent = results.iter().filter(|sent| **sent).count();
        let summary = BroadcastSummary {
            total_attempted,
            total_sent,
            total_failed: total_attempted - total_sent,
        };

        info!(
            total_attempted = summary.total_attempted,
            total_sent = summary.total_sent,
            total_failed = summary.total_failed,
            "Broadcast complete"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotificationError;
    use crate::models::{Channel, ChannelResult, NotificationPreference};
    use crate::preferences::PreferenceService;
    use crate::repository::{MockPreferenceRepository, MockUserDirectory};
    use async_trait::async_trait;
    use crate::channels::ChannelDispatcher;
    use crate::models::DispatchEvent as Event;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Dispatcher fake recording which users it delivered to, and under
    /// which category.
    struct RecordingDispatcher {
        delivered: Mutex<Vec<(Uuid, Category)>>,
    }

    impl RecordingDispatcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                delivered: Mutex::new(Vec::new()),
            })
        }

        fn delivered_ids(&self) -> Vec<Uuid> {
            self.delivered
                .lock()
                .unwrap()
                .iter()
                .map(|(id, _)| *id)
                .collect()
        }

        fn categories(&self) -> Vec<Category> {
            self.delivered
                .lock()
                .unwrap()
                .iter()
                .map(|(_, category)| *category)
                .collect()
        }
    }

    #[async_trait]
    impl ChannelDispatcher for RecordingDispatcher {
        fn channel(&self) -> Channel {
            Channel::InApp
        }

        async fn send(&self, event: &Event) -> ChannelResult {
            self.delivered
                .lock()
                .unwrap()
                .push((event.user_id, event.category));
            ChannelResult::ok(Channel::InApp)
        }
    }

    fn router_with(
        repo: MockPreferenceRepository,
        dispatcher: Arc<RecordingDispatcher>,
    ) -> Arc<NotificationRouter<MockPreferenceRepository>> {
        Arc::new(NotificationRouter::new(
            PreferenceService::new(repo),
            vec![dispatcher],
        ))
    }

    fn request(target: Option<UserType>) -> BroadcastRequest {
        BroadcastRequest {
            title: "Scheduled maintenance".to_string(),
            message: "The platform will be briefly unavailable tonight.".to_string(),
            category: None,
            action_link: None,
            target_user_type: target,
        }
    }

    #[tokio::test]
    async fn dispatches_once_per_client() {
        let client_ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let ids = client_ids.clone();

        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_ids()
            .times(1)
            .returning(move |_| Ok(ids.clone()));

        let mut repo = MockPreferenceRepository::new();
        repo.expect_find()
            .returning(|user_id, user_type| {
                Ok(Some(NotificationPreference::defaults(user_id, user_type)))
            });

        let dispatcher = RecordingDispatcher::new();
        let broadcaster = Broadcaster::new(
            router_with(repo, dispatcher.clone()),
            Arc::new(directory),
        );

        let summary = broadcaster
            .broadcast(request(Some(UserType::Client)))
            .await
            .unwrap();

        assert_eq!(summary.total_attempted, 5);
        assert_eq!(summary.total_sent, 5);
        assert_eq!(summary.total_failed, 0);

        let delivered: HashSet<Uuid> = dispatcher.delivered_ids().into_iter().collect();
        let expected: HashSet<Uuid> = client_ids.into_iter().collect();
        assert_eq!(delivered, expected);
        assert!(
            dispatcher
                .categories()
                .iter()
                .all(|c| *c == Category::System)
        );
    }

    #[tokio::test]
    async fn no_target_type_unions_all_types() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_ids()
            .times(3)
            .returning(|_| Ok(vec![Uuid::new_v4()]));

        let mut repo = MockPreferenceRepository::new();
        repo.expect_find()
            .returning(|user_id, user_type| {
                Ok(Some(NotificationPreference::defaults(user_id, user_type)))
            });

        let dispatcher = RecordingDispatcher::new();
        let broadcaster =
            Broadcaster::new(router_with(repo, dispatcher), Arc::new(directory));

        let summary = broadcaster.broadcast(request(None)).await.unwrap();
        assert_eq!(summary.total_attempted, 3);
        assert_eq!(summary.total_sent, 3);
    }

    #[tokio::test]
    async fn per_recipient_failures_are_counted_not_thrown() {
        // Two of the five recipients hit a failing preference store.
        let failing: HashSet<Uuid> = (0..2).map(|_| Uuid::new_v4()).collect();
        let healthy: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let mut all: Vec<Uuid> = failing.iter().copied().collect();
        all.extend(healthy.iter().copied());

        let ids = all.clone();
        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_ids()
            .times(1)
            .returning(move |_| Ok(ids.clone()));

        let poisoned = failing.clone();
        let mut repo = MockPreferenceRepository::new();
        repo.expect_find().returning(move |user_id, user_type| {
            if poisoned.contains(&user_id) {
                Err(NotificationError::Persistence("store down".into()))
            } else {
                Ok(Some(NotificationPreference::defaults(user_id, user_type)))
            }
        });

        let dispatcher = RecordingDispatcher::new();
        let broadcaster = Broadcaster::new(
            router_with(repo, dispatcher.clone()),
            Arc::new(directory),
        );

        let summary = broadcaster
            .broadcast(request(Some(UserType::Client)))
            .await
            .unwrap();

        assert_eq!(summary.total_attempted, 5);
        assert_eq!(summary.total_sent, 3);
        assert_eq!(summary.total_failed, 2);
        assert_eq!(dispatcher.delivered_ids().len(), 3);
    }

    #[tokio::test]
    async fn explicit_category_flows_through_to_recipients() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_ids()
            .times(1)
            .returning(|_| Ok(vec![Uuid::new_v4(), Uuid::new_v4()]));

        let mut repo = MockPreferenceRepository::new();
        repo.expect_find().returning(|user_id, user_type| {
            Ok(Some(NotificationPreference::defaults(user_id, user_type)))
        });

        let dispatcher = RecordingDispatcher::new();
        let broadcaster = Broadcaster::new(
            router_with(repo, dispatcher.clone()),
            Arc::new(directory),
        );

        let mut promo = request(Some(UserType::Client));
        promo.category = Some(Category::Promotion);
        let summary = broadcaster.broadcast(promo).await.unwrap();

        assert_eq!(summary.total_sent, 2);
        assert_eq!(
            dispatcher.categories(),
            vec![Category::Promotion, Category::Promotion]
        );
    }

    #[tokio::test]
    async fn broadcast_category_respects_recipient_toggles() {
        // One of the two clients has promotions switched off.
        let opted_out = Uuid::new_v4();
        let subscribed = Uuid::new_v4();
        let ids = vec![opted_out, subscribed];

        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_ids()
            .times(1)
            .returning(move |_| Ok(ids.clone()));

        let mut repo = MockPreferenceRepository::new();
        repo.expect_find().returning(move |user_id, user_type| {
            let mut pref = NotificationPreference::defaults(user_id, user_type);
            if user_id == opted_out {
                pref.promotion_notifications = false;
            }
            Ok(Some(pref))
        });

        let dispatcher = RecordingDispatcher::new();
        let broadcaster = Broadcaster::new(
            router_with(repo, dispatcher.clone()),
            Arc::new(directory),
        );

        let mut promo = request(Some(UserType::Client));
        promo.category = Some(Category::Promotion);
        let summary = broadcaster.broadcast(promo).await.unwrap();

        assert_eq!(summary.total_attempted, 2);
        assert_eq!(summary.total_sent, 1);
        assert_eq!(summary.total_failed, 1);
        assert_eq!(dispatcher.delivered_ids(), vec![subscribed]);
    }

    #[tokio::test]
    async fn enumeration_failure_propagates() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_user_ids()
            .returning(|_| Err(NotificationError::Persistence("directory down".into())));

        let repo = MockPreferenceRepository::new();
        let dispatcher = RecordingDispatcher::new();
        let broadcaster =
            Broadcaster::new(router_with(repo, dispatcher), Arc::new(directory));

        assert!(matches!(
            broadcaster.broadcast(request(Some(UserType::Artist))).await,
            Err(NotificationError::Persistence(_))
        ));
    }
}
