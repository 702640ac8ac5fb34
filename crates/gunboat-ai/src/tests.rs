#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use glam::DVec2;
    use gunboat_core::commands::PadState;
    use gunboat_core::constants::{GUN_OFFSET, RADAR_OFFSET};
    use gunboat_core::contact::{ContactId, ContactTable, TargetContact};
    use gunboat_core::enums::{AgentKind, ContactKind, PowerupKind};
    use gunboat_core::resource::ResourceCache;
    use gunboat_core::types::{heading_to_direction, FactionId};

    use crate::arbitrator::MissionArbitrator;
    use crate::controllers::hunter::HunterController;
    use crate::controllers::player::PlayerController;
    use crate::controllers::pro::ProController;
    use crate::controllers::registry::{self, SpawnContext};
    use crate::controllers::sniper::SniperController;
    use crate::controllers::spin::SpinController;
    use crate::controllers::vengeful::VengefulController;
    use crate::controllers::Controller;
    use crate::helm::Helm;
    use crate::mission::{Mission, MissionStatus};
    use crate::missions::search::SearchRange;
    use crate::missions::{HuntMission, ResupplyMission, SearchMission};

    // --- Test helm ---

    struct MockHelm {
        name: String,
        faction: Option<FactionId>,
        now: f64,
        last_kill: Option<f64>,
        health: ResourceCache,
        energy: ResourceCache,
        position: DVec2,
        heading: f64,
        velocity: DVec2,
        gun_azimuth: f64,
        radar_azimuth: f64,
        contacts: ContactTable,
        gun_ready: bool,
        heading_cmd: Option<f64>,
        rudder_cmd: Option<f64>,
        thrust_cmd: Option<(f64, f64)>,
        gun_cmd: Option<f64>,
        radar_rpm_cmd: Option<f64>,
        radar_azimuth_cmd: Option<f64>,
        radar_heading_cmd: Option<f64>,
        shots: Vec<f64>,
        shotgun_blasts: Vec<u32>,
    }

    impl MockHelm {
        fn new() -> Self {
            Self {
                name: "Test".into(),
                faction: Some(FactionId(1)),
                now: 0.0,
                last_kill: None,
                health: ResourceCache::full(20.0),
                energy: ResourceCache::full(20.0),
                position: DVec2::ZERO,
                heading: 0.0,
                velocity: DVec2::ZERO,
                gun_azimuth: 0.0,
                radar_azimuth: 0.0,
                contacts: ContactTable::new(),
                gun_ready: true,
                heading_cmd: None,
                rudder_cmd: None,
                thrust_cmd: None,
                gun_cmd: None,
                radar_rpm_cmd: None,
                radar_azimuth_cmd: None,
                radar_heading_cmd: None,
                shots: Vec::new(),
                shotgun_blasts: Vec::new(),
            }
        }

        fn add_boat(&mut self, id: u64, name: &str, position: DVec2, observed_at: f64) {
            self.contacts.record_hit(TargetContact::new(
                ContactId(id),
                ContactKind::Boat,
                name,
                Some(FactionId(100 + id as u32)),
                position,
                DVec2::ZERO,
                observed_at,
            ));
        }

        fn add_powerup(&mut self, id: u64, kind: PowerupKind, position: DVec2, observed_at: f64) {
            self.contacts.record_hit(TargetContact::new(
                ContactId(id),
                ContactKind::Powerup(kind),
                kind.display_name(),
                None,
                position,
                DVec2::ZERO,
                observed_at,
            ));
        }
    }

    impl Helm for MockHelm {
        fn name(&self) -> &str {
            &self.name
        }
        fn faction(&self) -> Option<FactionId> {
            self.faction
        }
        fn now(&self) -> f64 {
            self.now
        }
        fn dt(&self) -> f64 {
            0.02
        }
        fn last_kill_time(&self) -> Option<f64> {
            self.last_kill
        }
        fn health(&self) -> &ResourceCache {
            &self.health
        }
        fn energy(&self) -> &ResourceCache {
            &self.energy
        }
        fn position(&self) -> DVec2 {
            self.position
        }
        fn heading(&self) -> f64 {
            self.heading
        }
        fn velocity(&self) -> DVec2 {
            self.velocity
        }
        fn gun_position(&self) -> DVec2 {
            self.position + heading_to_direction(self.heading) * GUN_OFFSET
        }
        fn gun_azimuth(&self) -> f64 {
            self.gun_azimuth
        }
        fn radar_position(&self) -> DVec2 {
            self.position + heading_to_direction(self.heading) * RADAR_OFFSET
        }
        fn radar_azimuth(&self) -> f64 {
            self.radar_azimuth
        }
        fn radar_range(&self) -> f64 {
            500.0
        }
        fn contacts(&self) -> &ContactTable {
            &self.contacts
        }
        fn contacts_mut(&mut self) -> &mut ContactTable {
            &mut self.contacts
        }
        fn set_heading(&mut self, heading: f64) {
            self.heading_cmd = Some(heading);
        }
        fn set_rudder(&mut self, rudder: f64) {
            self.rudder_cmd = Some(rudder);
        }
        fn set_thrust(&mut self, forward: f64, lateral: f64) {
            self.thrust_cmd = Some((forward, lateral));
        }
        fn set_gun_azimuth(&mut self, azimuth: f64) {
            self.gun_cmd = Some(azimuth);
        }
        fn set_radar_rotation_speed(&mut self, rpm: f64) {
            self.radar_rpm_cmd = Some(rpm);
        }
        fn set_radar_azimuth(&mut self, azimuth: f64) {
            self.radar_azimuth_cmd = Some(azimuth);
        }
        fn set_radar_heading(&mut self, heading: f64) {
            self.radar_heading_cmd = Some(heading);
        }
        fn fire(&mut self, energy: f64) -> bool {
            if self.gun_ready {
                self.shots.push(energy.clamp(0.1, 5.0));
            }
            self.gun_ready
        }
        fn fire_shotgun(&mut self, fragments: u32) -> bool {
            if self.gun_ready {
                self.shotgun_blasts.push(fragments);
            }
            self.gun_ready
        }
        fn self_destruct(&mut self) {}
    }

    // --- Scripted mission for arbitration tests ---

    type Log = Arc<Mutex<Vec<String>>>;

    struct Scripted {
        name: &'static str,
        priority: Arc<Mutex<f64>>,
        abort: bool,
        log: Log,
    }

    impl Scripted {
        fn boxed(name: &'static str, priority: f64, log: &Log) -> (Box<dyn Mission>, Arc<Mutex<f64>>) {
            let handle = Arc::new(Mutex::new(priority));
            let mission = Scripted {
                name,
                priority: handle.clone(),
                abort: false,
                log: log.clone(),
            };
            (Box::new(mission), handle)
        }

        fn push(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{}:{what}", self.name));
        }
    }

    impl Mission for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }
        fn compute_priority(&mut self, _helm: &dyn Helm) -> f64 {
            *self.priority.lock().unwrap()
        }
        fn update(&mut self, _helm: &mut dyn Helm) -> MissionStatus {
            self.push("update");
            if self.abort {
                MissionStatus::Abort
            } else {
                MissionStatus::Continue
            }
        }
        fn on_acquired_priority(&mut self, _helm: &mut dyn Helm) {
            self.push("acquired");
        }
        fn on_lost_priority(&mut self, _helm: &mut dyn Helm) {
            self.push("lost");
        }
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    // --- Arbitration ---

    #[test]
    fn test_arbitrator_picks_highest_priority() {
        let log = Log::default();
        let mut helm = MockHelm::new();
        let (a, _) = Scripted::boxed("A", 0.2, &log);
        let (b, _) = Scripted::boxed("B", 0.9, &log);
        let (c, _) = Scripted::boxed("C", 0.5, &log);
        let mut arbitrator = MissionArbitrator::new(vec![a, b, c]);

        let transition = arbitrator.arbitrate(&mut helm).expect("first cycle selects");
        assert_eq!(transition.from, None);
        assert_eq!(transition.to, "B");
        assert_eq!(arbitrator.active_name(), Some("B"));
    }

    #[test]
    fn test_arbitrator_ties_go_to_first_registered() {
        let log = Log::default();
        let mut helm = MockHelm::new();
        let (a, _) = Scripted::boxed("A", 0.5, &log);
        let (b, _) = Scripted::boxed("B", 0.5, &log);
        let mut arbitrator = MissionArbitrator::new(vec![a, b]);
        arbitrator.arbitrate(&mut helm);
        assert_eq!(arbitrator.active_name(), Some("A"));
    }

    #[test]
    fn test_hooks_fire_only_on_transition() {
        let log = Log::default();
        let mut helm = MockHelm::new();
        let (a, a_priority) = Scripted::boxed("A", 0.8, &log);
        let (b, _) = Scripted::boxed("B", 0.4, &log);
        let mut arbitrator = MissionArbitrator::new(vec![a, b]);

        arbitrator.arbitrate(&mut helm);
        assert_eq!(drain(&log), vec!["A:acquired"]);

        assert!(arbitrator.arbitrate(&mut helm).is_none(), "no change, no transition");
        assert!(drain(&log).is_empty(), "hooks must not fire without a change");

        *a_priority.lock().unwrap() = 0.1;
        arbitrator.arbitrate(&mut helm);
        assert_eq!(drain(&log), vec!["A:lost", "B:acquired"]);
    }

    #[test]
    fn test_abort_keeps_updating_until_next_cycle() {
        let log = Log::default();
        let mut helm = MockHelm::new();
        let priority = Arc::new(Mutex::new(0.9));
        let aborting = Scripted {
            name: "A",
            priority: priority.clone(),
            abort: true,
            log: log.clone(),
        };
        let (b, _) = Scripted::boxed("B", 0.3, &log);
        let mut arbitrator = MissionArbitrator::new(vec![Box::new(aborting), b]);

        arbitrator.arbitrate(&mut helm);
        assert_eq!(arbitrator.update(&mut helm), MissionStatus::Abort);
        arbitrator.update(&mut helm);
        assert_eq!(arbitrator.active_name(), Some("A"), "abort does not switch mid-cycle");
        let aborted = arbitrator.priorities().find(|(n, _)| *n == "A").unwrap().1;
        assert_eq!(aborted, crate::arbitrator::ABORTED_PRIORITY);
        assert_eq!(drain(&log), vec!["A:acquired", "A:update", "A:update"]);

        arbitrator.arbitrate(&mut helm);
        assert_eq!(arbitrator.active_name(), Some("B"), "aborted mission sits out one cycle");
        assert_eq!(drain(&log), vec!["A:lost", "B:acquired"]);

        arbitrator.arbitrate(&mut helm);
        assert_eq!(arbitrator.active_name(), Some("A"), "rescored normally afterwards");
    }

    #[test]
    fn test_arbitration_is_deterministic() {
        let run = || {
            let log = Log::default();
            let mut helm = MockHelm::new();
            let (a, pa) = Scripted::boxed("A", 0.3, &log);
            let (b, pb) = Scripted::boxed("B", 0.3, &log);
            let (c, _) = Scripted::boxed("C", 0.2, &log);
            let mut arbitrator = MissionArbitrator::new(vec![a, b, c]);
            let mut picks = Vec::new();
            for step in 0..6 {
                *pa.lock().unwrap() = 0.1 * step as f64;
                *pb.lock().unwrap() = 0.5 - 0.05 * step as f64;
                arbitrator.arbitrate(&mut helm);
                picks.push(arbitrator.active_name());
            }
            picks
        };
        assert_eq!(run(), run());
    }

    // --- Hunt ---

    #[test]
    fn test_hunt_priority_zero_without_hostiles() {
        let mut helm = MockHelm::new();
        let mut hunt = HuntMission::new();
        assert_eq!(hunt.compute_priority(&helm), 0.0);

        helm.contacts.record_hit(TargetContact::new(
            ContactId(9),
            ContactKind::Boat,
            "Friend",
            helm.faction,
            DVec2::new(0.0, 50.0),
            DVec2::ZERO,
            0.0,
        ));
        assert_eq!(hunt.compute_priority(&helm), 0.0, "same-faction boats are not prey");
        assert!(hunt.target().is_none());
    }

    #[test]
    fn test_hunt_priority_grows_with_proximity() {
        let mut far = MockHelm::new();
        far.add_boat(1, "Pro", DVec2::new(0.0, 900.0), 0.0);
        let mut near = MockHelm::new();
        near.add_boat(1, "Pro", DVec2::new(0.0, 150.0), 0.0);

        let far_priority = HuntMission::new().compute_priority(&far);
        let mut hunt = HuntMission::new();
        let near_priority = hunt.compute_priority(&near);
        assert!(near_priority > far_priority);
        assert_eq!(hunt.target(), Some(ContactId(1)));

        near.last_kill = Some(0.0);
        let sated = HuntMission::new().compute_priority(&near);
        assert!(sated < near_priority, "a fresh kill lowers hunger");
    }

    #[test]
    fn test_hunt_burst_fire_pattern() {
        let mut helm = MockHelm::new();
        // Dead ahead, 100 m from the gun.
        helm.add_boat(1, "Pro", DVec2::new(0.0, 100.0 + GUN_OFFSET), 0.0);
        let mut hunt = HuntMission::new();
        hunt.compute_priority(&helm);

        for _ in 0..3 {
            assert_eq!(hunt.update(&mut helm), MissionStatus::Continue);
        }
        assert_eq!(helm.shots, vec![0.1, 0.1, 5.0], "two screening rounds, then full energy");
        assert_eq!(helm.shotgun_blasts, vec![10, 10, 10]);
        let gun = helm.gun_cmd.unwrap();
        assert!(gun.abs() < 1e-9, "gun laid dead ahead, got {gun}");
        assert_eq!(helm.radar_heading_cmd, Some(0.0), "radar held on the target bearing");
    }

    #[test]
    fn test_hunt_burst_counter_waits_for_successful_shots() {
        let mut helm = MockHelm::new();
        helm.add_boat(1, "Pro", DVec2::new(0.0, 300.0), 0.0);
        let mut hunt = HuntMission::new();
        hunt.compute_priority(&helm);

        helm.gun_ready = false;
        hunt.update(&mut helm);
        hunt.update(&mut helm);
        helm.gun_ready = true;
        hunt.update(&mut helm);
        assert_eq!(helm.shots, vec![0.1], "failed shots do not advance the pattern");
    }

    #[test]
    fn test_hunt_drops_target_not_reobserved() {
        let mut helm = MockHelm::new();
        let mut hunt = HuntMission::new();
        hunt.on_acquired_priority(&mut helm);
        helm.add_boat(1, "Pro", DVec2::new(0.0, 300.0), 0.5);
        hunt.compute_priority(&helm);

        helm.now = 2.0;
        assert_eq!(hunt.update(&mut helm), MissionStatus::Abort);
        assert!(helm.contacts.get_valid(ContactId(1)).is_none(), "contact invalidated");
        assert!(helm.contacts.contains(ContactId(1)), "invalidated, not removed");
    }

    // --- Resupply ---

    #[test]
    fn test_resupply_priority_formula() {
        let mut helm = MockHelm::new();
        helm.energy = ResourceCache::new(20.0, 10.0);
        // Exactly at the search origin 50 m ahead of the bow.
        helm.add_powerup(5, PowerupKind::Energy, DVec2::new(0.0, 50.0), 0.0);

        let mut refuel = ResupplyMission::refuel();
        let priority = refuel.compute_priority(&helm);
        assert!((priority - (0.75 * 0.25 + 0.25)).abs() < 1e-9, "got {priority}");
        assert_eq!(refuel.target(), Some(ContactId(5)));

        let mut repair = ResupplyMission::repair();
        assert_eq!(repair.compute_priority(&helm), 0.0, "no health powerup in sight");
        assert_eq!(repair.update(&mut helm), MissionStatus::Abort);
    }

    #[test]
    fn test_resupply_steers_to_pickup() {
        let mut helm = MockHelm::new();
        helm.add_powerup(5, PowerupKind::Health, DVec2::new(30.0, 30.0), 0.0);
        let mut repair = ResupplyMission::repair();
        repair.compute_priority(&helm);
        repair.on_acquired_priority(&mut helm);
        assert_eq!(repair.update(&mut helm), MissionStatus::Continue);
        assert!((helm.rudder_cmd.unwrap() - 45.0).abs() < 1e-9);
        assert_eq!(helm.thrust_cmd, Some((30.0, 30.0)));
        assert_eq!(helm.gun_cmd, Some(0.0));
    }

    #[test]
    fn test_resupply_gives_up_on_vanished_pickup() {
        let mut helm = MockHelm::new();
        helm.add_powerup(5, PowerupKind::Energy, DVec2::new(0.0, 5.0), 0.0);
        let mut refuel = ResupplyMission::refuel();
        refuel.compute_priority(&helm);
        helm.now = 2.0;
        assert_eq!(refuel.update(&mut helm), MissionStatus::Abort);
        assert!(helm.contacts.get_valid(ContactId(5)).is_none());
    }

    // --- Search ---

    #[test]
    fn test_search_walks_range_bands() {
        let mut helm = MockHelm::new();
        let mut search = SearchMission::new();
        let lonely = search.compute_priority(&helm);
        assert!((lonely - 0.75).abs() < 1e-9, "idle 0.5 plus full loneliness, got {lonely}");

        search.on_acquired_priority(&mut helm);
        assert_eq!(search.range(), SearchRange::Short);
        assert_eq!(helm.radar_rpm_cmd, Some(60.0));

        helm.now = 1.3;
        search.update(&mut helm);
        assert_eq!(search.range(), SearchRange::Medium);
        assert!((search.next_search_at() - 11.3).abs() < 1e-9);
        assert_eq!(helm.radar_rpm_cmd, Some(30.0));

        helm.now = 5.6;
        search.update(&mut helm);
        assert_eq!(search.range(), SearchRange::Long);
        assert_eq!(helm.radar_rpm_cmd, Some(5.0));

        assert!(search.compute_priority(&helm) < lonely, "a fresh search defers the next");
    }

    #[test]
    fn test_search_loneliness_fades_with_company() {
        let mut helm = MockHelm::new();
        let alone = SearchMission::new().compute_priority(&helm);
        for id in 1..=4 {
            helm.add_boat(id, "Pro", DVec2::new(10.0 * id as f64, 0.0), 0.0);
        }
        let crowded = SearchMission::new().compute_priority(&helm);
        assert!((alone - crowded - 0.25).abs() < 1e-9);
    }

    // --- Controllers ---

    #[test]
    fn test_registry_covers_every_kind() {
        let kinds = AgentKind::AUTONOMOUS.into_iter().chain([AgentKind::Player]);
        let mut names = Vec::new();
        for kind in kinds {
            let profile = registry::lookup(kind).expect("registered");
            let controller = (profile.build)(&SpawnContext::default());
            assert_eq!(controller.kind(), kind);
            names.push(profile.name);
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 7, "display names are unique");
    }

    #[test]
    fn test_hunter_searches_when_alone() {
        let mut helm = MockHelm::new();
        let mut hunter = HunterController::new();
        hunter.update1(&mut helm).unwrap();
        assert_eq!(hunter.active_mission(), Some("Search"));

        helm.add_boat(1, "Pro", DVec2::new(0.0, 150.0), 0.0);
        hunter.update1(&mut helm).unwrap();
        assert_eq!(hunter.active_mission(), Some("Hunt"));
    }

    #[test]
    fn test_sniper_ignores_vengeful_boats() {
        let mut helm = MockHelm::new();
        helm.add_boat(1, "Vengeful", DVec2::new(0.0, 52.0), 0.0);
        helm.add_boat(2, "Pro", DVec2::new(100.0, GUN_OFFSET), 0.0);
        let mut sniper = SniperController::new();
        sniper.update(&mut helm).unwrap();
        let gun = helm.gun_cmd.expect("gun laid");
        assert!((gun - 90.0).abs() < 1e-6, "aimed at the Pro, got {gun}");
    }

    #[test]
    fn test_sniper_records_victims() {
        let mut helm = MockHelm::new();
        helm.add_boat(2, "Pro", DVec2::new(0.0, 300.0), 0.0);
        let mut sniper = SniperController::new();
        sniper.update(&mut helm).unwrap();
        assert_eq!(helm.shots, vec![5.0]);
        assert_eq!(sniper.victims(), &[ContactId(2)]);
        assert!(helm.shotgun_blasts.is_empty(), "shotgun only at point blank");
    }

    #[test]
    fn test_spin_locks_radar_and_gun_ahead() {
        let mut helm = MockHelm::new();
        SpinController.start(&mut helm).unwrap();
        assert_eq!(helm.radar_azimuth_cmd, Some(0.0));
        assert_eq!(helm.gun_cmd, Some(0.0));
        assert_eq!(helm.thrust_cmd, Some((1.0, 0.0)));
        assert_eq!(helm.rudder_cmd, Some(1.0));
    }

    #[test]
    fn test_spin_fires_on_gun_line() {
        let mut helm = MockHelm::new();
        helm.add_boat(1, "Pro", DVec2::new(0.0, 80.0), 0.0);
        SpinController.update(&mut helm).unwrap();
        assert_eq!(helm.shots, vec![5.0], "a quarter of full energy");

        let mut poor = MockHelm::new();
        poor.energy = ResourceCache::new(20.0, 8.0);
        poor.add_boat(1, "Pro", DVec2::new(0.0, 80.0), 0.0);
        SpinController.update(&mut poor).unwrap();
        assert!(poor.shots.is_empty(), "too little energy to spend on a boat");
    }

    #[test]
    fn test_vengeful_accepts_only_grudge() {
        let contact = |name: &str| {
            TargetContact::new(
                ContactId(1),
                ContactKind::Boat,
                name,
                None,
                DVec2::ZERO,
                DVec2::ZERO,
                0.0,
            )
        };
        let built = registry::build(
            AgentKind::Vengeful,
            &SpawnContext {
                grudge: Some("Pro"),
                pad: None,
            },
        )
        .unwrap();
        assert!(built.accepts(&contact("Pro"), None));
        assert!(!built.accepts(&contact("Hunter"), None));

        let forgiving = VengefulController::new(None);
        assert!(!forgiving.accepts(&contact("Pro"), None));
    }

    #[test]
    fn test_vengeful_patrols_home_without_target() {
        let mut helm = MockHelm::new();
        helm.position = DVec2::new(0.0, 200.0);
        let mut vengeful = VengefulController::new(Some("Pro".into()));
        vengeful.update(&mut helm).unwrap();
        assert_eq!(helm.radar_rpm_cmd, Some(180.0));
        assert!((helm.heading_cmd.unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_pro_heads_home_when_idle() {
        let mut helm = MockHelm::new();
        helm.position = DVec2::new(100.0, 0.0);
        let mut pro = ProController::new();
        pro.start(&mut helm).unwrap();
        assert_eq!(helm.gun_cmd, Some(120.0));
        pro.update(&mut helm).unwrap();
        assert!((helm.heading_cmd.unwrap() - 270.0).abs() < 1e-9);
        assert!(helm.shots.is_empty());
    }

    #[test]
    fn test_player_maps_pad_to_commands() {
        let mut helm = MockHelm::new();
        let mut player = PlayerController::new(Some(0));
        player.on_input(&PadState {
            left_axis: (1.0, 0.5),
            right_axis: (1.0, 0.0),
            left_trigger: 0.0,
            right_trigger: 1.0,
        });
        player.update(&mut helm).unwrap();
        assert_eq!(helm.rudder_cmd, Some(4.0));
        assert_eq!(helm.thrust_cmd, Some((2.0, 0.0)));
        assert!((helm.gun_cmd.unwrap() - 1.8).abs() < 1e-9, "90 deg/s over one frame");
        assert_eq!(helm.shots, vec![1.0]);
        assert!(helm.shotgun_blasts.is_empty());
        assert_eq!(player.pad(), Some(0));
    }

    #[test]
    fn test_player_without_pad_is_inert() {
        let mut helm = MockHelm::new();
        let mut player = PlayerController::new(None);
        player.update(&mut helm).unwrap();
        assert!(helm.thrust_cmd.is_none());
    }
}
