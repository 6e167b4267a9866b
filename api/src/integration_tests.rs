//! End-to-end service flows
//!
//! Wires every service to shared in-memory repositories, the same way
//! `AppState::new` wires them to Postgres, and walks through the main user
//! journeys: signing up, logging sessions, following friends, and finishing
//! a challenge.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, NaiveDate, Utc};

    use crate::app::{
        AuthService, ChallengeService, DashboardService, FeedService, ProfileService,
        SessionService, SocialService,
    };
    use crate::domain::entities::{ActivityKind, User};
    use crate::error::AppError;
    use crate::feed::render_feed;
    use crate::test_utils::{
        test_challenge_input, test_new_session, InMemoryActivityRepository,
        InMemoryBadgeRepository, InMemoryChallengeRepository, InMemoryFollowRepository,
        InMemorySessionRepository, InMemoryUserRepository, RecordingAnalyticsClient,
    };

    struct World {
        auth: AuthService<InMemoryUserRepository, RecordingAnalyticsClient>,
        sessions: SessionService<
            InMemorySessionRepository,
            InMemoryActivityRepository,
            RecordingAnalyticsClient,
        >,
        dashboard: DashboardService<InMemorySessionRepository>,
        feed: FeedService<InMemoryUserRepository, InMemoryActivityRepository, InMemoryFollowRepository>,
        social: SocialService<InMemoryUserRepository, InMemoryFollowRepository>,
        profiles: ProfileService<InMemoryUserRepository, InMemorySessionRepository, InMemoryBadgeRepository>,
        challenges: ChallengeService<
            InMemoryChallengeRepository,
            InMemorySessionRepository,
            InMemoryBadgeRepository,
            RecordingAnalyticsClient,
        >,
        analytics: Arc<RecordingAnalyticsClient>,
    }

    fn world() -> World {
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new());
        let activities = Arc::new(InMemoryActivityRepository::new());
        let follows = Arc::new(InMemoryFollowRepository::new());
        let challenges = Arc::new(InMemoryChallengeRepository::new());
        let badges = Arc::new(InMemoryBadgeRepository::new());
        let analytics = Arc::new(RecordingAnalyticsClient::new());

        World {
            auth: AuthService::new(users.clone(), analytics.clone(), "pepper".to_string()),
            sessions: SessionService::new(sessions.clone(), activities.clone(), analytics.clone()),
            dashboard: DashboardService::new(sessions.clone()),
            feed: FeedService::new(users.clone(), activities, follows.clone()),
            social: SocialService::new(users.clone(), follows),
            profiles: ProfileService::new(users, sessions.clone(), badges.clone()),
            challenges: ChallengeService::new(challenges, sessions, badges, analytics.clone()),
            analytics,
        }
    }

    fn yesterday() -> NaiveDate {
        (Utc::now() - Duration::days(1)).date_naive()
    }

    /// Sign up and log in, returning the user behind the issued token
    async fn register(world: &World, email: &str, name: &str) -> User {
        world
            .auth
            .signup(email, "correct horse", Some(name))
            .await
            .unwrap();
        let (_, token) = world.auth.login(email, "correct horse").await.unwrap();
        world.auth.find_by_token(&token).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn signup_login_and_token_lookup() {
        let world = world();

        let user = register(&world, "Ann@Example.com", "Ann").await;
        assert_eq!(user.email.as_deref(), Some("ann@example.com"));

        let wrong = world.auth.login("ann@example.com", "nope-nope").await;
        assert!(matches!(wrong, Err(AppError::Unauthorized)));

        let duplicate = world
            .auth
            .signup("ann@example.com", "another pass", None)
            .await;
        assert!(duplicate.is_err());

        assert_eq!(world.analytics.event_names(), vec!["signup", "login"]);
    }

    #[tokio::test]
    async fn friends_see_each_other_in_the_feed() {
        let world = world();
        let ann = register(&world, "ann@example.com", "Ann").await;
        let bob = register(&world, "bob@example.com", "Bob").await;

        world
            .sessions
            .log_session(&ann, test_new_session(yesterday()))
            .await
            .unwrap();

        // Bob does not follow Ann yet
        assert!(world.feed.generate_feed(&bob, None).await.unwrap().is_empty());

        world.social.follow(&bob, ann.id).await.unwrap();
        let feed = world.feed.generate_feed(&bob, None).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].actor_name, "Ann");

        let reply = world
            .feed
            .encourage(&bob, feed[0].activity.id, "Keep going!")
            .await
            .unwrap();
        assert_eq!(reply.kind, ActivityKind::Encouragement);
        assert_eq!(reply.related_id, Some(feed[0].activity.id));

        let feed = world.feed.generate_feed(&bob, None).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].activity.id, reply.id);

        let text = render_feed(&feed);
        assert!(text.contains("**Bob**"));
        assert!(text.contains("**Ann**"));

        let followers = world.social.followers(&ann, ann.id).await.unwrap();
        assert_eq!(followers.len(), 1);
        assert_eq!(followers[0].id, bob.id);
    }

    #[tokio::test]
    async fn private_profiles_leave_the_feed() {
        let world = world();
        let ann = register(&world, "ann@example.com", "Ann").await;
        let bob = register(&world, "bob@example.com", "Bob").await;

        world.social.follow(&bob, ann.id).await.unwrap();
        world
            .sessions
            .log_session(&ann, test_new_session(yesterday()))
            .await
            .unwrap();
        let ann = world.profiles.set_visibility(&ann, false).await.unwrap();

        assert!(world.feed.generate_feed(&bob, None).await.unwrap().is_empty());
        assert_eq!(world.feed.generate_feed(&ann, None).await.unwrap().len(), 1);
        assert!(world.profiles.view(&bob, ann.id).await.is_err());
    }

    #[tokio::test]
    async fn logged_sessions_complete_a_challenge() {
        let world = world();
        let ann = register(&world, "ann@example.com", "Ann").await;
        let today = Utc::now().date_naive();

        let challenge = world
            .challenges
            .create(&ann, test_challenge_input("First Hour", 40, today))
            .await
            .unwrap();
        world.challenges.join(&ann, challenge.id).await.unwrap();

        let first = world
            .sessions
            .log_session(&ann, test_new_session(today))
            .await
            .unwrap();
        let awarded = world.challenges.credit_session(&ann, &first).await.unwrap();
        assert!(awarded.is_empty());

        let second = world
            .sessions
            .log_session(&ann, test_new_session(today))
            .await
            .unwrap();
        let awarded = world.challenges.credit_session(&ann, &second).await.unwrap();
        assert_eq!(awarded, vec!["First Hour".to_string()]);

        let progress = world.challenges.progress(&ann, challenge.id).await.unwrap();
        assert_eq!(progress.minutes, 40);
        assert!(progress.is_completed());

        let stats = world.profiles.stats(&ann, ann.id).await.unwrap();
        assert_eq!(stats.total_minutes, 40);
        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.badges, vec!["First Hour".to_string()]);

        let dashboard = world.dashboard.dashboard(&ann).await.unwrap();
        assert_eq!(dashboard.total_minutes, 40);
        assert_eq!(dashboard.current_streak, 1);

        assert!(world.analytics.event_names().contains(&"badge_awarded"));
    }
}
