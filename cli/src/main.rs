use chrono::Utc;
use clap::{Parser, Subcommand};

use alfred::engine::STREAK_BADGES;
use alfred::error::{AppResult, run_with_error_handler};

#[derive(Parser, Debug)]
#[command(about = "Progress tracker for the El Camino del Infinito episodes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a day of activity (reading pages counts too)
    Visit,

    /// Submit quiz answers for an episode
    Quiz {
        /// Episode number
        #[arg(long)]
        episode: u32,
        /// Selected option index per question, e.g. --answers 0,1,2,3,0
        #[arg(long, value_delimiter = ',')]
        answers: Vec<usize>,
    },

    /// Confirm the real-world challenge of an episode
    Challenge {
        /// Episode number
        #[arg(long)]
        episode: u32,
    },

    /// Learner view: points, level and streak
    Status,

    /// Streak badges and the next one to earn
    Badges,

    /// Parent dashboard summary
    Parent,

    /// Wipe all stored progress
    Reset {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

fn main() {
    run_with_error_handler(run);
}

fn run() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    alfred::setup_trace();

    let args = Cli::parse();
    let (mut tracker, catalog) = alfred::build_tracker()?;
    let now = Utc::now();

    match args.command {
        Commands::Visit => {
            let update = tracker.record_activity(now.date_naive())?;
            let streak = tracker.streak();
            if update.streak_reset() {
                println!("Streak reset. Back to day 1, today counts.");
            } else {
                println!("Day {} of your streak.", streak.current_streak());
            }
            announce_badges(update.unlocked());
        }

        Commands::Quiz { episode, answers } => {
            let episode = catalog.by_number(episode)?;
            let outcome = tracker.submit_quiz(episode, &answers, now)?;

            println!(
                "{}/{} correct ({:.0}%).",
                outcome.correct_count(),
                outcome.total_questions(),
                outcome.score_percent()
            );
            if outcome.passed() {
                if outcome.perfect() {
                    println!("Perfect quiz! +{} points.", outcome.points_earned());
                } else {
                    println!("Passed. +{} points.", outcome.points_earned());
                }
                println!("Challenge unlocked: {}", episode.challenge());
            } else {
                println!(
                    "Not passed ({}% needed). The score is saved, try again.",
                    tracker.rules().pass_threshold()
                );
            }
        }

        Commands::Challenge { episode } => {
            let episode = catalog.by_number(episode)?;
            let outcome = tracker.complete_challenge(episode, now)?;

            if outcome.newly_completed() {
                println!(
                    "Challenge done, episode {} complete. +{} points.",
                    episode.number(),
                    outcome.points_earned()
                );
            } else {
                println!("Episode {} was already complete.", episode.number());
            }
        }

        Commands::Status => {
            let progress = tracker.progress();
            let level = tracker.level_status();
            let streak = tracker.streak();

            println!(
                "{} {}: {} points",
                level.current().icon(),
                level.current().name(),
                progress.total_points()
            );
            if level.at_max_tier() {
                println!("Top level reached.");
            } else {
                println!(
                    "{:.0}% of the way to {} points",
                    level.progress_percent(),
                    level.next_threshold()
                );
            }
            println!(
                "Streak: {} days (longest {})",
                streak.current_streak(),
                streak.longest_streak()
            );
            println!(
                "Episodes completed: {}/{}",
                progress.episodes_completed().len(),
                catalog.len()
            );
        }

        Commands::Badges => {
            let streak = tracker.streak();
            for badge in STREAK_BADGES {
                let mark = if streak.has_badge(badge.id()) {
                    badge.icon()
                } else {
                    "🔒"
                };
                println!("{mark} {}: {}", badge.name(), badge.description());
            }
            if let Some(next) = streak.next_badge() {
                println!(
                    "Next: {} in {} days.",
                    next.name(),
                    streak.days_until_next_badge()
                );
            } else {
                println!("All streak badges unlocked.");
            }
        }

        Commands::Parent => {
            let stats = tracker.stats(catalog.len(), now);
            let level = tracker.level_status();
            let streak = tracker.streak();

            println!("Level: {} (tier {})", level.current().name(), level.current().tier());
            println!("Completion: {:.0}%", stats.completion_rate());
            println!("Average quiz score: {}%", stats.average_score());
            println!("Perfect quizzes: {}", stats.perfect_quizzes());
            println!("Challenges completed: {}", stats.challenges_completed());
            println!(
                "Points per day: {} over {} days",
                stats.points_per_day(),
                stats.days_active()
            );
            println!(
                "Streak: {} days, longest {}",
                streak.current_streak(),
                streak.longest_streak()
            );
        }

        Commands::Reset { yes } => {
            if !yes {
                println!("This deletes all stored progress. Re-run with --yes to confirm.");
                return Ok(());
            }
            tracker.reset(now)?;
            println!("Progress wiped.");
        }
    }

    Ok(())
}

fn announce_badges(unlocked: &[&'static alfred::engine::StreakBadge]) {
    for badge in unlocked {
        println!("{} Badge unlocked: {} ({})", badge.icon(), badge.name(), badge.description());
    }
}
