//! Use case, concurrency and end-to-end tests for the prediction crate

#[cfg(test)]
mod ledger_tests {
    use std::sync::Arc;

    use crate::application::{
        ReferenceDataUseCase, SubmitPredictionInput, SubmitPredictionOutput,
        SubmitPredictionUseCase,
    };
    use crate::domain::entity::{league::League, team::Team};
    use crate::domain::value_object::{LeagueId, TeamId, UserId};
    use crate::error::{LedgerError, LedgerResult};
    use crate::infra::InMemoryLedgerRepository;

    struct Fixture {
        repo: Arc<InMemoryLedgerRepository>,
        league: League,
        teams: Vec<Team>,
    }

    impl Fixture {
        async fn new(team_count: usize) -> Self {
            let repo = Arc::new(InMemoryLedgerRepository::new());
            let reference = ReferenceDataUseCase::new(repo.clone());

            let league = reference
                .create_league("Premier League", Some("PL".to_string()))
                .await
                .unwrap();

            let mut teams = Vec::new();
            for i in 0..team_count {
                teams.push(
                    reference
                        .create_team(&format!("Team {}", i + 1), None)
                        .await
                        .unwrap(),
                );
            }

            Self {
                repo,
                league,
                teams,
            }
        }

        async fn submit(
            &self,
            user_id: UserId,
            team_id: TeamId,
            rank: i64,
        ) -> LedgerResult<SubmitPredictionOutput> {
            submit(&self.repo, user_id, self.league.league_id, team_id, rank).await
        }
    }

    async fn submit(
        repo: &Arc<InMemoryLedgerRepository>,
        user_id: UserId,
        league_id: LeagueId,
        team_id: TeamId,
        rank: i64,
    ) -> LedgerResult<SubmitPredictionOutput> {
        SubmitPredictionUseCase::new(repo.clone())
            .execute(SubmitPredictionInput {
                user_id,
                league_id,
                team_id,
                predicted_rank: rank,
            })
            .await
    }

    #[tokio::test]
    async fn test_submit_records_prediction() {
        let fx = Fixture::new(2).await;
        let user = UserId::new();

        let first = fx.submit(user, fx.teams[0].team_id, 1).await.unwrap();
        let second = fx.submit(user, fx.teams[1].team_id, 2).await.unwrap();
        assert_ne!(first.prediction_id, second.prediction_id);

        let recorded = fx.repo.predictions_for(user, fx.league.league_id);
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].team_id, fx.teams[0].team_id);
        assert_eq!(recorded[1].predicted_rank.value(), 2);
    }

    #[tokio::test]
    async fn test_rank_validated_before_storage() {
        let fx = Fixture::new(1).await;

        for rank in [0, -1, i64::MIN] {
            let result = fx.submit(UserId::new(), fx.teams[0].team_id, rank).await;
            assert!(matches!(result, Err(LedgerError::Validation(_))));
        }

        // Validation wins even when the references are bogus
        let result = submit(&fx.repo, UserId::new(), LeagueId::new(), TeamId::new(), 0).await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert_eq!(fx.repo.prediction_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_references() {
        let fx = Fixture::new(1).await;
        let user = UserId::new();

        let result = submit(&fx.repo, user, LeagueId::new(), fx.teams[0].team_id, 1).await;
        assert!(matches!(result, Err(LedgerError::LeagueNotFound)));

        let result = fx.submit(user, TeamId::new(), 1).await;
        assert!(matches!(result, Err(LedgerError::TeamNotFound)));

        assert_eq!(fx.repo.prediction_count(), 0);
    }

    #[tokio::test]
    async fn test_conflicts_are_distinguished() {
        let fx = Fixture::new(2).await;
        let user = UserId::new();

        fx.submit(user, fx.teams[0].team_id, 1).await.unwrap();

        let same_team = fx.submit(user, fx.teams[0].team_id, 2).await;
        assert!(matches!(same_team, Err(LedgerError::TeamAlreadyPredicted)));

        let same_rank = fx.submit(user, fx.teams[1].team_id, 1).await;
        assert!(matches!(same_rank, Err(LedgerError::RankAlreadyUsed)));

        // Exact re-submission is rejected, not overwritten
        let resubmit = fx.submit(user, fx.teams[0].team_id, 1).await;
        assert!(matches!(resubmit, Err(LedgerError::TeamAlreadyPredicted)));

        assert_eq!(fx.repo.prediction_count(), 1);
    }

    #[tokio::test]
    async fn test_uniqueness_is_per_user_and_league() {
        let fx = Fixture::new(1).await;
        let reference = ReferenceDataUseCase::new(fx.repo.clone());
        let other_league = reference.create_league("La Liga", None).await.unwrap();

        let team = fx.teams[0].team_id;
        let alice = UserId::new();
        let bob = UserId::new();

        fx.submit(alice, team, 1).await.unwrap();
        fx.submit(bob, team, 1).await.unwrap();
        submit(&fx.repo, alice, other_league.league_id, team, 1)
            .await
            .unwrap();

        assert_eq!(fx.repo.prediction_count(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_team_single_winner() {
        let fx = Arc::new(Fixture::new(1).await);
        let user = UserId::new();

        let mut handles = Vec::new();
        for rank in 1..=16 {
            let fx = fx.clone();
            handles.push(tokio::spawn(async move {
                fx.submit(user, fx.teams[0].team_id, rank).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(LedgerError::TeamAlreadyPredicted) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(fx.repo.prediction_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_rank_never_both() {
        let fx = Arc::new(Fixture::new(16).await);
        let user = UserId::new();

        let mut handles = Vec::new();
        for i in 0..16 {
            let fx = fx.clone();
            handles.push(tokio::spawn(async move {
                fx.submit(user, fx.teams[i].team_id, 1).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(LedgerError::RankAlreadyUsed) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(fx.repo.predictions_for(user, fx.league.league_id).len(), 1);
    }

    #[tokio::test]
    async fn test_league_names_unique() {
        let fx = Fixture::new(0).await;
        let reference = ReferenceDataUseCase::new(fx.repo.clone());

        let duplicate = reference.create_league("  Premier League", None).await;
        assert!(matches!(duplicate, Err(LedgerError::LeagueNameTaken)));

        let blank = reference.create_league("   ", None).await;
        assert!(matches!(blank, Err(LedgerError::Validation(_))));

        assert_eq!(reference.list_leagues().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_listings_sorted_by_name() {
        let fx = Fixture::new(0).await;
        let reference = ReferenceDataUseCase::new(fx.repo.clone());
        reference.create_team("Wolves", None).await.unwrap();
        reference.create_team("Arsenal", Some("57".into())).await.unwrap();

        let teams = reference.list_teams().await.unwrap();
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Arsenal", "Wolves"]);
        assert_eq!(teams[0].external_id.as_deref(), Some("57"));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use auth::{AccessGate, AuthConfig, InMemoryUserRepository, auth_router};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::ReferenceDataUseCase;
    use crate::domain::value_object::{LeagueId, TeamId};
    use crate::infra::InMemoryLedgerRepository;
    use crate::presentation::prediction_router;

    struct TestApp {
        router: Router,
        users: Arc<InMemoryUserRepository>,
        league: LeagueId,
        team_1: TeamId,
        team_2: TeamId,
    }

    async fn app() -> TestApp {
        let users = Arc::new(InMemoryUserRepository::new());
        let ledger = Arc::new(InMemoryLedgerRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());

        let reference = ReferenceDataUseCase::new(ledger.clone());
        let league = reference.create_league("League 1", None).await.unwrap();
        let team_1 = reference.create_team("Team 1", None).await.unwrap();
        let team_2 = reference.create_team("Team 2", None).await.unwrap();

        let gate = AccessGate::new(users.clone(), config.clone());
        let router = Router::new()
            .nest("/api/auth", auth_router(users.clone(), config))
            .nest("/api", prediction_router(ledger, gate));

        TestApp {
            router,
            users,
            league: league.league_id,
            team_1: team_1.team_id,
            team_2: team_2.team_id,
        }
    }

    async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn prediction(league: LeagueId, team: TeamId, rank: i64) -> Value {
        json!({"leagueId": league, "teamId": team, "predictedRank": rank})
    }

    async fn register_and_login(app: &TestApp, username: &str, password: &str) -> String {
        let credentials = json!({"username": username, "password": password});
        let (status, _) = send(
            app,
            post_json("/api/auth/register", None, credentials.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app, post_json("/api/auth/login", None, credentials)).await;
        assert_eq!(status, StatusCode::OK);
        body["accessToken"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_alice_scenario() {
        let app = app().await;

        let credentials = json!({"username": "alice", "password": "secret1"});
        let (status, _) = send(
            &app,
            post_json("/api/auth/register", None, credentials.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            post_json(
                "/api/auth/login",
                None,
                json!({"username": "alice", "password": "wrong-pass"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, post_json("/api/auth/login", None, credentials)).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["accessToken"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_json("/api/predictions", Some(&token), prediction(app.league, app.team_1, 1)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["predictionId"].is_string());

        let (status, body) = send(
            &app,
            post_json("/api/predictions", Some(&token), prediction(app.league, app.team_2, 1)),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Rank already used in this league");

        let (status, body) = send(
            &app,
            post_json("/api/predictions", Some(&token), prediction(app.league, app.team_1, 2)),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Team already predicted in this league");
    }

    #[tokio::test]
    async fn test_submit_requires_valid_token() {
        let app = app().await;
        let body = prediction(app.league, app.team_1, 1);

        let (status, _) = send(&app, post_json("/api/predictions", None, body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, post_json("/api/predictions", Some("x.y.z"), body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_for_deleted_user_is_not_found() {
        let app = app().await;
        let token = register_and_login(&app, "ghost", "secret1").await;

        let users = app.users.clone();
        let (status, body) = send(
            &app,
            Request::get("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user_id = body["userId"].as_str().unwrap().parse().unwrap();
        users.remove(&user_id);

        let (status, _) = send(
            &app,
            post_json("/api/predictions", Some(&token), prediction(app.league, app.team_1, 1)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_validation_and_references() {
        let app = app().await;
        let token = register_and_login(&app, "bob", "secret1").await;

        let (status, _) = send(
            &app,
            post_json("/api/predictions", Some(&token), prediction(app.league, app.team_1, 0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            post_json(
                "/api/predictions",
                Some(&token),
                json!({"leagueId": app.league, "teamId": app.team_1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            post_json(
                "/api/predictions",
                Some(&token),
                prediction(LeagueId::new(), app.team_1, 1),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            post_json(
                "/api/predictions",
                Some(&token),
                prediction(app.league, TeamId::new(), 1),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reference_listings_are_public() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Request::get("/api/leagues").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "League 1");
        assert_eq!(body[0]["leagueId"], json!(app.league));
        assert!(body[0]["externalId"].is_null());

        let (status, body) = send(
            &app,
            Request::get("/api/teams").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
