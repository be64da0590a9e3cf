#[cfg(test)]
mod tests {
    use crate::addons::{
        AddonMetadata, AddonRepositoryTrait, NewWorkshopAddon, PlatformType, WorkshopAddon,
    };
    use crate::commands::MockCommandPublisher;
    use crate::errors::{DatabaseError, Error, ErrorKind, Result};
    use crate::installations::{
        InstallationManager, InstallationRepositoryTrait, InstallationServiceTrait,
        InstallationStatus, NewInstallation, WorkshopInstallation,
    };
    use crate::servers::{
        GameConfig, GameConfigRepositoryTrait, NewGameConfig, NewServerGameConfig,
        ServerGameConfig, ServerGameConfigRepositoryTrait,
    };
    use crate::sessions::{NewSession, Session, SessionRepositoryTrait, SessionStatus};
    use crate::strategies::{
        ConfigurationStrategy, ConfigurationStrategyRepositoryTrait, NewConfigurationStrategy,
        StrategyType,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDateTime, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn not_found(what: &str, id: &str) -> Error {
        Error::Database(DatabaseError::NotFound(format!("{} {}", what, id)))
    }

    // --- Mock AddonRepository ---
    #[derive(Default)]
    struct MockAddonRepository {
        addons: Mutex<Vec<WorkshopAddon>>,
    }

    #[async_trait]
    impl AddonRepositoryTrait for MockAddonRepository {
        async fn create(&self, _new_addon: NewWorkshopAddon) -> Result<WorkshopAddon> {
            unimplemented!()
        }

        async fn update(&self, _addon: WorkshopAddon) -> Result<WorkshopAddon> {
            unimplemented!()
        }

        async fn delete(&self, _addon_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, addon_id: &str) -> Result<WorkshopAddon> {
            self.addons
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == addon_id)
                .cloned()
                .ok_or_else(|| not_found("addon", addon_id))
        }

        fn find_by_workshop_id(
            &self,
            _game_id: &str,
            _workshop_id: &str,
        ) -> Result<Option<WorkshopAddon>> {
            unimplemented!()
        }

        fn list_by_game(&self, _game_id: &str) -> Result<Vec<WorkshopAddon>> {
            unimplemented!()
        }
    }

    // --- Mock InstallationRepository ---
    #[derive(Default)]
    struct MockInstallationRepository {
        installations: Mutex<Vec<WorkshopInstallation>>,
        /// Simulates another request creating the row between find and create.
        lose_create_race: AtomicBool,
        writes: AtomicUsize,
    }

    impl MockInstallationRepository {
        fn count(&self) -> usize {
            self.installations.lock().unwrap().len()
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn set_status(&self, id: &str, status: InstallationStatus) {
            let mut installations = self.installations.lock().unwrap();
            if let Some(i) = installations.iter_mut().find(|i| i.id == id) {
                i.status = status;
            }
        }
    }

    #[async_trait]
    impl InstallationRepositoryTrait for MockInstallationRepository {
        async fn create(&self, new_installation: NewInstallation) -> Result<WorkshopInstallation> {
            if self.lose_create_race.load(Ordering::SeqCst) {
                return Err(DatabaseError::UniqueViolation(
                    "workshop_installations.sgc_id, workshop_installations.addon_id".to_string(),
                )
                .into());
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut installations = self.installations.lock().unwrap();
            let installation = WorkshopInstallation {
                id: format!("inst-{}", installations.len() + 1),
                sgc_id: new_installation.sgc_id,
                addon_id: new_installation.addon_id,
                status: new_installation.status,
                installation_path: new_installation.installation_path,
                progress_percent: new_installation.progress_percent,
                error_message: None,
                created_at: now(),
                updated_at: now(),
            };
            installations.push(installation.clone());
            Ok(installation)
        }

        async fn update(&self, installation: WorkshopInstallation) -> Result<WorkshopInstallation> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut installations = self.installations.lock().unwrap();
            let slot = installations
                .iter_mut()
                .find(|i| i.id == installation.id)
                .ok_or_else(|| not_found("installation", &installation.id))?;
            *slot = installation.clone();
            Ok(installation)
        }

        async fn update_status(
            &self,
            installation_id: &str,
            status: InstallationStatus,
        ) -> Result<WorkshopInstallation> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut installations = self.installations.lock().unwrap();
            let slot = installations
                .iter_mut()
                .find(|i| i.id == installation_id)
                .ok_or_else(|| not_found("installation", installation_id))?;
            slot.status = status;
            Ok(slot.clone())
        }

        async fn delete(&self, _installation_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, installation_id: &str) -> Result<WorkshopInstallation> {
            self.installations
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == installation_id)
                .cloned()
                .ok_or_else(|| not_found("installation", installation_id))
        }

        fn find_by_sgc_and_addon(
            &self,
            sgc_id: &str,
            addon_id: &str,
        ) -> Result<Option<WorkshopInstallation>> {
            Ok(self
                .installations
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.sgc_id == sgc_id && i.addon_id == addon_id)
                .cloned())
        }

        fn list_by_sgc(&self, sgc_id: &str) -> Result<Vec<WorkshopInstallation>> {
            Ok(self
                .installations
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.sgc_id == sgc_id)
                .cloned()
                .collect())
        }
    }

    // --- Mock ServerGameConfigRepository ---
    #[derive(Default)]
    struct MockSgcRepository {
        sgcs: Mutex<Vec<ServerGameConfig>>,
    }

    #[async_trait]
    impl ServerGameConfigRepositoryTrait for MockSgcRepository {
        async fn create(&self, _new_sgc: NewServerGameConfig) -> Result<ServerGameConfig> {
            unimplemented!()
        }

        async fn delete(&self, _sgc_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, sgc_id: &str) -> Result<ServerGameConfig> {
            self.sgcs
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == sgc_id)
                .cloned()
                .ok_or_else(|| not_found("sgc", sgc_id))
        }

        fn list_by_server(&self, _server_id: &str) -> Result<Vec<ServerGameConfig>> {
            unimplemented!()
        }
    }

    // --- Mock GameConfigRepository ---
    #[derive(Default)]
    struct MockGameConfigRepository {
        configs: Mutex<Vec<GameConfig>>,
    }

    #[async_trait]
    impl GameConfigRepositoryTrait for MockGameConfigRepository {
        async fn create(&self, _new_config: NewGameConfig) -> Result<GameConfig> {
            unimplemented!()
        }

        async fn delete(&self, _config_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, config_id: &str) -> Result<GameConfig> {
            self.configs
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == config_id)
                .cloned()
                .ok_or_else(|| not_found("game config", config_id))
        }

        fn list(&self) -> Result<Vec<GameConfig>> {
            Ok(self.configs.lock().unwrap().clone())
        }
    }

    // --- Mock ConfigurationStrategyRepository ---
    #[derive(Default)]
    struct MockStrategyRepository {
        strategies: Mutex<Vec<ConfigurationStrategy>>,
    }

    #[async_trait]
    impl ConfigurationStrategyRepositoryTrait for MockStrategyRepository {
        async fn create(
            &self,
            _new_strategy: NewConfigurationStrategy,
        ) -> Result<ConfigurationStrategy> {
            unimplemented!()
        }

        async fn delete(&self, _strategy_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, _strategy_id: &str) -> Result<ConfigurationStrategy> {
            unimplemented!()
        }

        fn list_by_game(&self, game_id: &str) -> Result<Vec<ConfigurationStrategy>> {
            Ok(self
                .strategies
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.game_id == game_id)
                .cloned()
                .collect())
        }
    }

    // --- Mock SessionRepository ---
    #[derive(Default)]
    struct MockSessionRepository {
        sessions: Mutex<Vec<Session>>,
        fail_listing: AtomicBool,
    }

    #[async_trait]
    impl SessionRepositoryTrait for MockSessionRepository {
        async fn create(&self, _new_session: NewSession) -> Result<Session> {
            unimplemented!()
        }

        async fn update_status(&self, _session_id: &str, _status: SessionStatus) -> Result<Session> {
            unimplemented!()
        }

        fn get_by_id(&self, _session_id: &str) -> Result<Session> {
            unimplemented!()
        }

        fn list_by_sgc(&self, sgc_id: &str) -> Result<Vec<Session>> {
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(DatabaseError::QueryFailed("sessions unavailable".to_string()).into());
            }
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.sgc_id == sgc_id)
                .cloned()
                .collect())
        }
    }

    struct Fixture {
        addons: Arc<MockAddonRepository>,
        installations: Arc<MockInstallationRepository>,
        strategies: Arc<MockStrategyRepository>,
        sessions: Arc<MockSessionRepository>,
        publisher: MockCommandPublisher,
        manager: InstallationManager,
    }

    fn addon(id: &str, workshop_id: &str, installation_path: Option<&str>) -> WorkshopAddon {
        WorkshopAddon {
            id: id.to_string(),
            game_id: "1".to_string(),
            workshop_id: workshop_id.to_string(),
            platform_type: PlatformType::Steam,
            name: format!("Addon {}", id),
            description: None,
            file_size_bytes: None,
            is_collection: false,
            last_updated: None,
            installation_path: installation_path.map(str::to_string),
            metadata: AddonMetadata {
                steam_app_id: Some("4000".to_string()),
                ..Default::default()
            },
            created_at: now(),
            updated_at: now(),
        }
    }

    fn strategy(
        id: &str,
        strategy_type: StrategyType,
        target_path: Option<&str>,
    ) -> ConfigurationStrategy {
        ConfigurationStrategy {
            id: id.to_string(),
            game_id: "1".to_string(),
            strategy_type,
            target_path: target_path.map(str::to_string),
            apply_order: 0,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn session(id: &str, status: SessionStatus) -> Session {
        Session {
            id: id.to_string(),
            sgc_id: "1".to_string(),
            status,
            started_at: Some(now()),
            ended_at: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    /// SGC 1 on server 10, game config 1 for game 1, addon 1 at "maps",
    /// one volume strategy at "/data".
    fn fixture() -> Fixture {
        let addons = Arc::new(MockAddonRepository::default());
        let installations = Arc::new(MockInstallationRepository::default());
        let sgcs = Arc::new(MockSgcRepository::default());
        let game_configs = Arc::new(MockGameConfigRepository::default());
        let strategies = Arc::new(MockStrategyRepository::default());
        let sessions = Arc::new(MockSessionRepository::default());
        let publisher = MockCommandPublisher::new();

        addons
            .addons
            .lock()
            .unwrap()
            .push(addon("1", "123456", Some("maps")));
        sgcs.sgcs.lock().unwrap().push(ServerGameConfig {
            id: "1".to_string(),
            game_config_id: "1".to_string(),
            server_id: "10".to_string(),
            name: "eu-1".to_string(),
            created_at: now(),
            updated_at: now(),
        });
        game_configs.configs.lock().unwrap().push(GameConfig {
            id: "1".to_string(),
            game_id: "1".to_string(),
            name: "Garry's Mod".to_string(),
            created_at: now(),
            updated_at: now(),
        });
        strategies
            .strategies
            .lock()
            .unwrap()
            .push(strategy("s1", StrategyType::Volume, Some("/data")));

        let manager = InstallationManager::new(
            addons.clone(),
            installations.clone(),
            sgcs,
            game_configs,
            strategies.clone(),
            sessions.clone(),
            Arc::new(publisher.clone()),
        );

        Fixture {
            addons,
            installations,
            strategies,
            sessions,
            publisher,
            manager,
        }
    }

    #[tokio::test]
    async fn test_first_install_creates_pending_and_dispatches() {
        let f = fixture();

        let installation = f.manager.install_addon("1", "1", false).await.unwrap();

        assert_eq!(installation.sgc_id, "1");
        assert_eq!(installation.addon_id, "1");
        assert_eq!(installation.status, InstallationStatus::Pending);
        assert_eq!(installation.installation_path, "/data/maps");
        assert_eq!(installation.progress_percent, 0);

        let downloads = f.publisher.download_commands();
        assert_eq!(downloads.len(), 1);
        let (server_id, command) = &downloads[0];
        assert_eq!(server_id, "10");
        assert_eq!(command.installation_id, installation.id);
        assert_eq!(command.workshop_id, "123456");
        assert_eq!(command.install_path, "/data/maps");
        assert_eq!(command.steam_app_id, "4000");
    }

    #[tokio::test]
    async fn test_installed_pair_is_idempotent() {
        let f = fixture();
        let first = f.manager.install_addon("1", "1", false).await.unwrap();
        f.installations
            .set_status(&first.id, InstallationStatus::Installed);
        let writes_before = f.installations.writes();

        let second = f.manager.install_addon("1", "1", false).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.status, InstallationStatus::Installed);
        assert_eq!(f.publisher.download_commands().len(), 1);
        assert_eq!(f.installations.count(), 1);
        assert_eq!(f.installations.writes(), writes_before);
    }

    #[tokio::test]
    async fn test_forced_reinstall_resets_and_dispatches_again() {
        let f = fixture();
        let first = f.manager.install_addon("1", "1", false).await.unwrap();
        f.installations
            .set_status(&first.id, InstallationStatus::Installed);

        let again = f.manager.install_addon("1", "1", true).await.unwrap();

        assert_eq!(again.id, first.id);
        assert_eq!(again.status, InstallationStatus::Pending);
        assert_eq!(again.progress_percent, 0);
        assert_eq!(f.installations.count(), 1);
        assert_eq!(f.publisher.download_commands().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_install_is_retried_without_force() {
        let f = fixture();
        let first = f.manager.install_addon("1", "1", false).await.unwrap();
        f.installations.set_status(&first.id, InstallationStatus::Failed);

        let retried = f.manager.install_addon("1", "1", false).await.unwrap();

        assert_eq!(retried.id, first.id);
        assert_eq!(retried.status, InstallationStatus::Pending);
        assert_eq!(f.publisher.download_commands().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_volume_strategy_fails_without_side_effects() {
        let f = fixture();
        *f.strategies.strategies.lock().unwrap() =
            vec![strategy("s2", StrategyType::CliArgs, Some("/ignored"))];

        let err = f.manager.install_addon("1", "1", false).await.unwrap_err();

        assert!(err
            .to_string()
            .contains("no volume strategy found for game"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(f.installations.count(), 0);
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_volume_strategy_without_target_path_fails() {
        let f = fixture();
        *f.strategies.strategies.lock().unwrap() =
            vec![strategy("s3", StrategyType::Volume, None)];

        let err = f.manager.install_addon("1", "1", false).await.unwrap_err();

        assert!(err
            .to_string()
            .contains("volume strategy missing target_path"));
        assert_eq!(f.installations.count(), 0);
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_first_volume_strategy_wins() {
        let f = fixture();
        *f.strategies.strategies.lock().unwrap() = vec![
            strategy("s0", StrategyType::EnvVars, Some("/env")),
            ConfigurationStrategy {
                apply_order: 9,
                ..strategy("s1", StrategyType::Volume, Some("/srv/first"))
            },
            ConfigurationStrategy {
                apply_order: 1,
                ..strategy("s2", StrategyType::Volume, Some("/srv/second"))
            },
        ];

        let installation = f.manager.install_addon("1", "1", false).await.unwrap();

        assert_eq!(installation.installation_path, "/srv/first/maps");
    }

    #[tokio::test]
    async fn test_addon_without_installation_path_fails() {
        let f = fixture();
        f.addons
            .addons
            .lock()
            .unwrap()
            .push(addon("2", "777", None));

        let err = f.manager.install_addon("1", "2", false).await.unwrap_err();

        assert!(err.to_string().contains("addon missing installation_path"));
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_addon_path_naming_volume_root_fails_without_side_effects() {
        let f = fixture();
        f.addons
            .addons
            .lock()
            .unwrap()
            .extend([addon("2", "777", Some(".")), addon("3", "888", Some("maps/.."))]);

        for addon_id in ["2", "3"] {
            let err = f
                .manager
                .install_addon("1", addon_id, false)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(err.to_string().contains("resolves to the volume root"));
        }

        assert_eq!(f.installations.count(), 0);
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_missing_addon_and_sgc_are_not_found() {
        let f = fixture();

        let err = f.manager.install_addon("1", "99", false).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("failed to load addon 99"));

        let err = f.manager.install_addon("42", "1", false).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_lost_create_race_is_conflict_without_dispatch() {
        let f = fixture();
        f.installations
            .lose_create_race
            .store(true, Ordering::SeqCst);

        let err = f.manager.install_addon("1", "1", false).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_is_propagated() {
        let f = fixture();
        f.publisher.fail_with("bus down");

        let err = f.manager.install_addon("1", "1", false).await.unwrap_err();

        assert!(matches!(err, Error::Publish(_)));
        assert_eq!(err.kind(), ErrorKind::DependentSystem);
        // The pending record stays; a later call retries it.
        assert_eq!(f.installations.count(), 1);
    }

    #[tokio::test]
    async fn test_active_session_blocks_removal() {
        let f = fixture();
        let installation = f.manager.install_addon("1", "1", false).await.unwrap();
        f.installations
            .set_status(&installation.id, InstallationStatus::Installed);
        f.sessions
            .sessions
            .lock()
            .unwrap()
            .push(session("sess-1", SessionStatus::Running));

        let err = f
            .manager
            .remove_installation(&installation.id)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("active session"));
        assert!(err.to_string().contains("sess-1"));
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        let after = f.manager.get_installation(&installation.id).unwrap();
        assert_eq!(after.status, InstallationStatus::Installed);
        assert!(f.publisher.remove_commands().is_empty());
    }

    #[tokio::test]
    async fn test_inactive_sessions_allow_removal() {
        let f = fixture();
        let installation = f.manager.install_addon("1", "1", false).await.unwrap();
        f.sessions.sessions.lock().unwrap().extend([
            session("sess-1", SessionStatus::Completed),
            session("sess-2", SessionStatus::Stopped),
        ]);

        f.manager
            .remove_installation(&installation.id)
            .await
            .unwrap();

        let after = f.manager.get_installation(&installation.id).unwrap();
        assert_eq!(after.status, InstallationStatus::Removed);
        let removes = f.publisher.remove_commands();
        assert_eq!(removes.len(), 1);
        assert_eq!(removes[0].0, "10");
        assert_eq!(removes[0].1.installation_path, "/data/maps");
        assert_eq!(removes[0].1.addon_id, "1");
    }

    #[tokio::test]
    async fn test_session_listing_failure_aborts_removal() {
        let f = fixture();
        let installation = f.manager.install_addon("1", "1", false).await.unwrap();
        f.sessions.fail_listing.store(true, Ordering::SeqCst);

        let err = f
            .manager
            .remove_installation(&installation.id)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DependentSystem);
        let after = f.manager.get_installation(&installation.id).unwrap();
        assert_eq!(after.status, InstallationStatus::Pending);
        assert!(f.publisher.remove_commands().is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_installation_is_not_found() {
        let f = fixture();
        let err = f.manager.remove_installation("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(f.publisher.is_empty());
    }

    #[tokio::test]
    async fn test_removal_publish_failure_keeps_removed_status() {
        let f = fixture();
        let installation = f.manager.install_addon("1", "1", false).await.unwrap();
        f.publisher.fail_with("bus down");

        let err = f
            .manager
            .remove_installation(&installation.id)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Publish(_)));
        let after = f.manager.get_installation(&installation.id).unwrap();
        assert_eq!(after.status, InstallationStatus::Removed);
    }

    #[tokio::test]
    async fn test_list_installations_by_sgc() {
        let f = fixture();
        f.manager.install_addon("1", "1", false).await.unwrap();

        assert_eq!(f.manager.list_installations("1").unwrap().len(), 1);
        assert!(f.manager.list_installations("2").unwrap().is_empty());
    }
}
