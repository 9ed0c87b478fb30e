//! The video's scenes.
//!
//! `part1`, `part2` and `part3` are the canonical cut. The other ids are earlier takes of the
//! same segments; each keeps its own timing and transitions and is never merged with the
//! canonical one.

use std::str::FromStr;

use crate::{
    config::SceneConfig,
    foundation::error::{ReelError, ReelResult},
    scene::script::Scene,
};

mod part1;
mod part2;
mod part3;
mod takes;

/// Scene selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SceneId {
    /// Binary code, word cloud, King and Queen, "Meaning = Math?".
    #[serde(rename = "part1")]
    Part1,
    /// Take of Part 1 with a dashed connection and an earlier fade of the pair.
    #[serde(rename = "part1-the-problem")]
    Part1TheProblem,
    /// Take of Part 1 morphing the binary block straight into the cloud.
    #[serde(rename = "part1-languages-as-vectors")]
    Part1LanguagesAsVectors,
    /// Embedding plane and King − Man + Woman ≈ Queen.
    #[serde(rename = "part2")]
    Part2,
    /// Take of Part 2 with shorter holds and no illustration vectors.
    #[serde(rename = "part2-the-solution")]
    Part2TheSolution,
    /// 3D point cloud and title card.
    #[serde(rename = "part3")]
    Part3,
}

impl SceneId {
    /// Every scene, canonical ones first in playing order.
    pub const ALL: [SceneId; 6] = [
        Self::Part1,
        Self::Part2,
        Self::Part3,
        Self::Part1TheProblem,
        Self::Part1LanguagesAsVectors,
        Self::Part2TheSolution,
    ];

    /// The canonical cut, in playing order.
    pub const CANONICAL: [SceneId; 3] = [Self::Part1, Self::Part2, Self::Part3];

    /// Stable id used on the command line and in output paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::Part1 => "part1",
            Self::Part1TheProblem => "part1-the-problem",
            Self::Part1LanguagesAsVectors => "part1-languages-as-vectors",
            Self::Part2 => "part2",
            Self::Part2TheSolution => "part2-the-solution",
            Self::Part3 => "part3",
        }
    }

    /// One-line summary.
    pub fn title(self) -> &'static str {
        match self {
            Self::Part1 => "The problem: can meaning be math?",
            Self::Part1TheProblem => "The problem (dashed-line take)",
            Self::Part1LanguagesAsVectors => "The problem (binary-morph take)",
            Self::Part2 => "The solution: words as vectors",
            Self::Part2TheSolution => "The solution (short take)",
            Self::Part3 => "Languages as vectors",
        }
    }

    /// `true` for the three scenes of the final cut.
    pub fn is_canonical(self) -> bool {
        Self::CANONICAL.contains(&self)
    }

    /// Runtime in seconds the narration was timed against.
    pub fn documented_runtime(self) -> f64 {
        match self {
            Self::Part1 => 22.0,
            Self::Part1TheProblem => 16.0,
            Self::Part1LanguagesAsVectors => 15.0,
            Self::Part2 => 78.0,
            Self::Part2TheSolution => 52.5,
            Self::Part3 => 14.0,
        }
    }

    /// Declare and validate the scene.
    pub fn build(self, config: &SceneConfig) -> ReelResult<Scene> {
        match self {
            Self::Part1 => part1::build(config),
            Self::Part1TheProblem => takes::part1_the_problem(config),
            Self::Part1LanguagesAsVectors => takes::part1_languages_as_vectors(config),
            Self::Part2 => part2::build(config),
            Self::Part2TheSolution => takes::part2_the_solution(config),
            Self::Part3 => part3::build(config),
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneId {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|id| id.name()).collect();
                ReelError::validation(format!(
                    "unknown scene '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}
