use crate::infra::{build_schedule, parse_date, parse_datetime, parse_day_hours, DayHours};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::Args;
use lunchping::availability::{classify, today_hours_label, HolidaySet};
use lunchping::config::AppConfig;
use lunchping::error::AppError;
use lunchping::recommendation::{
    PoolChangePolicy, PoolEntry, RecommendationSession, SessionError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct AvailabilityArgs {
    /// Opening hours as DAY=HH:MM-HH:MM (mon..sun, weekdays, daily); repeatable
    #[arg(long, value_parser = parse_day_hours)]
    pub(crate) hours: Vec<DayHours>,
    /// Irregular holiday (YYYY-MM-DD); repeatable
    #[arg(long, value_parser = parse_date)]
    pub(crate) holiday: Vec<NaiveDate>,
    /// Moment to classify (YYYY-MM-DDTHH:MM). Defaults to now in APP_UTC_OFFSET.
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) at: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Restaurant name to add to the pool; repeatable, duplicates are ignored
    #[arg(long, required = true)]
    pub(crate) candidate: Vec<String>,
    /// Number of picks to draw (the first pick plus re-rolls)
    #[arg(long, default_value_t = 1)]
    pub(crate) rounds: usize,
    /// Cosmetic picks shown before each winner (defaults to RECOMMEND_FLICKER_COUNT)
    #[arg(long)]
    pub(crate) flicker: Option<usize>,
    /// Seed for reproducible picks; also skips the reveal delay
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_availability(args: AvailabilityArgs) -> Result<(), AppError> {
    let AvailabilityArgs { hours, holiday, at } = args;

    let at = match at {
        Some(at) => at,
        None => AppConfig::load()?.clock.now(),
    };
    let schedule = build_schedule(&hours);
    let holidays: HolidaySet = holiday.into_iter().collect();
    let status = classify(&schedule, &holidays, at);

    println!("LunchPing availability");
    println!("  At: {} ({})", at.format("%Y-%m-%d %H:%M"), at.weekday());
    println!("  Status: {} ({})", status.label(), status_key(status));
    println!("  Today: {}", today_hours_label(&schedule, at.weekday()));
    if !holidays.is_empty() {
        let listed: Vec<String> = holidays.iter().map(|date| date.to_string()).collect();
        println!("  Holidays: {}", listed.join(", "));
    }

    Ok(())
}

fn status_key(status: lunchping::availability::AvailabilityStatus) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// One settled pick and the cosmetic names shown before it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Round {
    pub(crate) flicker: Vec<String>,
    pub(crate) winner: String,
    pub(crate) seen: usize,
}

pub(crate) async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let pool = candidate_pool(&args.candidate);
    let flicker = args.flicker.unwrap_or(config.recommendation.flicker_count);
    let interval = if args.seed.is_some() {
        Duration::ZERO
    } else {
        config.recommendation.flicker_interval
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let rounds = draw_rounds(
        &pool,
        args.rounds,
        flicker,
        config.recommendation.pool_change_policy,
        &mut rng,
    )?;

    println!("LunchPing recommendation over {} candidates", pool.len());
    for (index, round) in rounds.iter().enumerate() {
        for name in &round.flicker {
            println!("  ... {name}");
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }
        println!(
            "Round {}: 오늘은 {} 어때요? ({}/{} seen)",
            index + 1,
            round.winner,
            round.seen,
            pool.len()
        );
    }

    Ok(())
}

pub(crate) fn candidate_pool(names: &[String]) -> Vec<PoolEntry> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && seen.insert(name.to_string()))
        .map(|name| PoolEntry::new(name).with_field("name", name))
        .collect()
}

pub(crate) fn draw_rounds<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    rounds: usize,
    flicker: usize,
    policy: PoolChangePolicy,
    rng: &mut R,
) -> Result<Vec<Round>, SessionError> {
    let mut session = RecommendationSession::new(policy);
    let mut drawn = Vec::with_capacity(rounds);

    session.begin(pool)?;
    for round in 0..rounds {
        if round > 0 {
            session.begin(pool)?;
        }
        let shown = session
            .flicker(pool, flicker, rng)?
            .map(label)
            .collect();
        let winner = label(session.settle(pool, rng)?);
        drawn.push(Round {
            flicker: shown,
            winner,
            seen: session.state().len(),
        });
    }
    session.close();

    Ok(drawn)
}

fn label(entry: &PoolEntry) -> String {
    entry.name().unwrap_or(&entry.id).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn pool_drops_blanks_and_duplicates() {
        let pool = candidate_pool(&names(&["을지면옥", " ", "우래옥", "을지면옥"]));
        let ids: Vec<&str> = pool.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["을지면옥", "우래옥"]);
        assert_eq!(pool[0].name(), Some("을지면옥"));
    }

    #[test]
    fn rounds_cover_the_pool_before_repeating() {
        let pool = candidate_pool(&names(&["a", "b", "c"]));
        let mut rng = StdRng::seed_from_u64(17);

        let rounds =
            draw_rounds(&pool, 6, 4, PoolChangePolicy::ResetSeen, &mut rng).expect("draws");
        assert_eq!(rounds.len(), 6);
        assert!(rounds.iter().all(|round| round.flicker.len() == 4));

        let mut first: Vec<&str> = rounds[..3].iter().map(|r| r.winner.as_str()).collect();
        first.sort();
        assert_eq!(first, vec!["a", "b", "c"]);
        assert_eq!(rounds[2].seen, 3);
        assert_eq!(rounds[3].seen, 1, "fourth pick starts a fresh deal");
    }

    #[test]
    fn empty_pool_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = draw_rounds(&[], 1, 4, PoolChangePolicy::ResetSeen, &mut rng)
            .expect_err("empty pool");
        assert!(matches!(err, SessionError::Sampler(_)));
    }
}
