use crate::constants::{DEBUG_HEIGHT, DEBUG_WIDTH};

/// Command-line settings.
///
/// `vibe-flappy [max_frames]` plays in the terminal.
/// `vibe-flappy --debug [width height [max_frames]]` runs headless with scripted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub debug_mode_active: bool,
    pub debug_width: u16,
    pub debug_height: u16,
    pub max_frames: Option<u64>,
}

impl Config {
    /// Parses the arguments after the program name. Unparseable numbers fall back to defaults.
    pub fn from_args(args: &[String]) -> Self {
        let debug_mode_active = args.first().is_some_and(|a| a == "--debug");

        if debug_mode_active {
            let (debug_width, debug_height) = if args.len() >= 3 {
                (
                    args[1].parse::<u16>().unwrap_or(DEBUG_WIDTH),
                    args[2].parse::<u16>().unwrap_or(DEBUG_HEIGHT),
                )
            } else {
                (DEBUG_WIDTH, DEBUG_HEIGHT)
            };
            Config {
                debug_mode_active,
                debug_width,
                debug_height,
                max_frames: args.get(3).and_then(|a| a.parse::<u64>().ok()),
            }
        } else {
            Config {
                debug_mode_active,
                debug_width: DEBUG_WIDTH,
                debug_height: DEBUG_HEIGHT,
                max_frames: args.first().and_then(|a| a.parse::<u64>().ok()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_plays_forever() {
        let config = Config::from_args(&[]);
        assert!(!config.debug_mode_active);
        assert_eq!(config.max_frames, None);
    }

    #[test]
    fn bare_number_limits_frames() {
        assert_eq!(Config::from_args(&args(&["900"])).max_frames, Some(900));
        assert_eq!(Config::from_args(&args(&["lots"])).max_frames, None);
    }

    #[test]
    fn debug_takes_size_then_frames() {
        let config = Config::from_args(&args(&["--debug", "100", "40", "250"]));
        assert!(config.debug_mode_active);
        assert_eq!((config.debug_width, config.debug_height), (100, 40));
        assert_eq!(config.max_frames, Some(250));
    }

    #[test]
    fn debug_defaults_bad_sizes() {
        let config = Config::from_args(&args(&["--debug", "wide", "40"]));
        assert_eq!((config.debug_width, config.debug_height), (DEBUG_WIDTH, 40));
        assert_eq!(config.max_frames, None);
    }
}
