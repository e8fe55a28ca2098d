use log::LevelFilter;

use crate::constants::{DEBUG_HEIGHT, DEBUG_WIDTH, LOG_FILE};

/// Command line options.
///
/// ```text
/// fireworks [max_frames]
/// fireworks --debug [width height [max_frames]]
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub debug_mode_active: bool,
    pub debug_width: u16,
    pub debug_height: u16,
    pub max_frames: Option<u64>,
    pub log_file: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug_mode_active: false,
            debug_width: DEBUG_WIDTH,
            debug_height: DEBUG_HEIGHT,
            max_frames: None,
            log_file: LOG_FILE.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Config::default();
        config.debug_mode_active = args.len() > 1 && args[1] == "--debug";

        if config.debug_mode_active {
            config.log_level = LevelFilter::Debug;
            if args.len() >= 4 {
                config.debug_width = args[2].parse::<u16>().unwrap_or(DEBUG_WIDTH).max(1);
                config.debug_height = args[3].parse::<u16>().unwrap_or(DEBUG_HEIGHT).max(1);
            }
            config.max_frames = args.get(4).and_then(|arg| arg.parse::<u64>().ok());
        } else {
            config.max_frames = args.get(1).and_then(|arg| arg.parse::<u64>().ok());
        }
        config
    }
}
