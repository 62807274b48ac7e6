//! Club logo lookup.
//!
//! Logos live under `{root}/logos/{league code}/`, one image per club, with
//! file names that only roughly follow the club names of the event data.

use std::fs;
use std::path::{Path, PathBuf};

use strsim::jaro_winkler;
use tracing::{debug, warn};

/// Resolves presentation assets for a club.
pub trait ClubAssetResolver {
    /// Logo image for `club` of `league`; a default image when none matches.
    fn logo_path(&self, league: &str, club: &str) -> PathBuf;
}

/// Folder code of a league's logo directory.
pub fn league_logo_code(league: &str) -> Option<&'static str> {
    let code = match league.trim() {
        "EPL" => "GB1",
        "Serie A" => "IT1",
        "La Liga" => "ES1",
        "Bundesliga" => "L1",
        "Ligue 1" => "FR1",
        "Eredivisie" => "NL1",
        "Liga Nos" => "PO1",
        "Jupiler Pro League" => "BE1",
        _ => return None,
    };
    Some(code)
}

/// Picks the logo file whose name is most similar to the club name.
#[derive(Debug, Clone)]
pub struct FuzzyLogoResolver {
    root: PathBuf,
    default_logo: PathBuf,
    cutoff: f64,
}

impl FuzzyLogoResolver {
    pub const DEFAULT_CUTOFF: f64 = 0.8;

    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            default_logo: root.join("img/logo_tr.png"),
            root,
            cutoff: Self::DEFAULT_CUTOFF,
        }
    }

    pub fn with_default_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_logo = path.into();
        self
    }

    /// Minimum similarity in `[0, 1]`.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn default_logo(&self) -> &Path {
        &self.default_logo
    }

    fn candidates(dir: &Path) -> Vec<String> {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .collect(),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "logo directory unreadable");
                Vec::new()
            }
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

impl ClubAssetResolver for FuzzyLogoResolver {
    fn logo_path(&self, league: &str, club: &str) -> PathBuf {
        let Some(code) = league_logo_code(league) else {
            debug!(league, "no logo folder for league");
            return self.default_logo.clone();
        };
        let dir = self.root.join("logos").join(code);
        let wanted = normalize(club);

        let best = Self::candidates(&dir)
            .into_iter()
            .map(|name| {
                let score = jaro_winkler(&wanted, &normalize(file_stem(&name)));
                (name, score)
            })
            .filter(|(_, score)| *score >= self.cutoff)
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(&a.0)));

        match best {
            Some((name, score)) => {
                debug!(club, logo = %name, score, "logo matched");
                dir.join(name)
            }
            None => {
                debug!(club, league, "no logo above cutoff, using default");
                self.default_logo.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logos/FR1");
        fs::create_dir_all(&dir).unwrap();
        for name in ["Paris Saint-Germain.png", "Olympique Lyon.png", "Olympique Marseille.png"] {
            fs::write(dir.join(name), b"png").unwrap();
        }
        root
    }

    #[test]
    fn test_league_codes() {
        assert_eq!(league_logo_code("EPL"), Some("GB1"));
        assert_eq!(league_logo_code("Jupiler Pro League"), Some("BE1"));
        assert_eq!(league_logo_code("MLS"), None);
    }

    #[test]
    fn test_fuzzy_match_picks_closest_file() {
        let root = logo_root();
        let resolver = FuzzyLogoResolver::new(root.path());
        assert_eq!(
            resolver.logo_path("Ligue 1", "Paris-Saint-Germain"),
            root.path().join("logos/FR1/Paris Saint-Germain.png")
        );
        assert_eq!(
            resolver.logo_path("Ligue 1", "Marseille"),
            resolver.default_logo().to_path_buf()
        );
        assert_eq!(
            resolver.logo_path("Ligue 1", "Olympique Marseille"),
            root.path().join("logos/FR1/Olympique Marseille.png")
        );
    }

    #[test]
    fn test_unknown_league_or_missing_folder_uses_default() {
        let root = logo_root();
        let resolver = FuzzyLogoResolver::new(root.path()).with_default_logo("fallback.png");
        assert_eq!(resolver.logo_path("MLS", "LA Galaxy"), PathBuf::from("fallback.png"));
        assert_eq!(resolver.logo_path("EPL", "Arsenal"), PathBuf::from("fallback.png"));
    }
}
