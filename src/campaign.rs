//! Screen flow and level progression
//!
//! Menu → Briefing → Playing, then either the next level's Briefing,
//! the Victory screen after the last level, or GameOver.

use crate::session::MissionOutcome;
use crate::tuning::{LevelConfig, campaign_levels};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Briefing,
    Playing,
    GameOver,
    Victory,
}

/// Campaign progress
#[derive(Debug, Clone)]
pub struct Campaign {
    pub screen: Screen,
    /// Current level index (0-based)
    pub level_index: usize,
    levels: Vec<LevelConfig>,
    /// Briefing text for the current level, once it has arrived
    briefing: Option<String>,
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new(campaign_levels())
    }
}

impl Campaign {
    pub fn new(levels: Vec<LevelConfig>) -> Self {
        Self {
            screen: Screen::Menu,
            level_index: 0,
            levels,
            briefing: None,
        }
    }

    /// Leave the menu for the first briefing
    pub fn start_game(&mut self) {
        self.enter_briefing(0);
    }

    /// Back to the first briefing after a loss or a finished campaign
    pub fn restart(&mut self) {
        self.enter_briefing(0);
    }

    fn enter_briefing(&mut self, level_index: usize) {
        self.level_index = level_index;
        self.briefing = None;
        self.screen = Screen::Briefing;
        log::info!("Briefing for mission {}", self.mission_number());
    }

    /// Briefing text is ready (real or fallback)
    pub fn briefing_received(&mut self, text: String) {
        if self.screen == Screen::Briefing {
            self.briefing = Some(text);
        }
    }

    pub fn briefing(&self) -> Option<&str> {
        self.briefing.as_deref()
    }

    /// Still waiting on the briefing uplink
    pub fn is_loading_briefing(&self) -> bool {
        self.screen == Screen::Briefing && self.briefing.is_none()
    }

    /// Launch the mission. Only allowed from a loaded briefing.
    pub fn launch_mission(&mut self) -> bool {
        if self.screen != Screen::Briefing || self.is_loading_briefing() {
            return false;
        }
        self.screen = Screen::Playing;
        log::info!("Mission {} launched", self.mission_number());
        true
    }

    /// Apply a mission result
    pub fn mission_ended(&mut self, outcome: MissionOutcome) {
        if self.screen != Screen::Playing {
            return;
        }
        match outcome {
            MissionOutcome::Victory if self.level_index + 1 < self.levels.len() => {
                self.enter_briefing(self.level_index + 1);
            }
            MissionOutcome::Victory => {
                self.screen = Screen::Victory;
                log::info!("Campaign complete");
            }
            MissionOutcome::Defeat => {
                self.screen = Screen::GameOver;
                log::info!("Mission {} failed", self.mission_number());
            }
        }
    }

    pub fn current_level(&self) -> Option<&LevelConfig> {
        self.levels.get(self.level_index)
    }

    /// 1-based mission number shown to the player
    pub fn mission_number(&self) -> u32 {
        self.level_index as u32 + 1
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn briefed(campaign: &mut Campaign) {
        campaign.briefing_received("orders".into());
    }

    #[test]
    fn test_full_campaign() {
        let mut campaign = Campaign::default();
        assert_eq!(campaign.screen, Screen::Menu);
        campaign.start_game();

        for level in 0..campaign.level_count() {
            assert_eq!(campaign.screen, Screen::Briefing);
            assert_eq!(campaign.level_index, level);
            briefed(&mut campaign);
            assert!(campaign.launch_mission());
            campaign.mission_ended(MissionOutcome::Victory);
        }

        assert_eq!(campaign.screen, Screen::Victory);
    }

    #[test]
    fn test_cannot_launch_while_loading() {
        let mut campaign = Campaign::default();
        campaign.start_game();
        assert!(campaign.is_loading_briefing());
        assert!(!campaign.launch_mission());
        briefed(&mut campaign);
        assert_eq!(campaign.briefing(), Some("orders"));
        assert!(campaign.launch_mission());
        assert_eq!(campaign.screen, Screen::Playing);
    }

    #[test]
    fn test_defeat_then_restart() {
        let mut campaign = Campaign::default();
        campaign.start_game();
        briefed(&mut campaign);
        campaign.launch_mission();
        campaign.mission_ended(MissionOutcome::Victory);
        briefed(&mut campaign);
        campaign.launch_mission();
        campaign.mission_ended(MissionOutcome::Defeat);
        assert_eq!(campaign.screen, Screen::GameOver);
        assert_eq!(campaign.mission_number(), 2);

        campaign.restart();
        assert_eq!(campaign.screen, Screen::Briefing);
        assert_eq!(campaign.level_index, 0);
        assert!(campaign.briefing().is_none());
    }

    #[test]
    fn test_outcome_outside_mission_ignored() {
        let mut campaign = Campaign::default();
        campaign.start_game();
        campaign.mission_ended(MissionOutcome::Victory);
        assert_eq!(campaign.screen, Screen::Briefing);
        assert_eq!(campaign.level_index, 0);
    }
}
