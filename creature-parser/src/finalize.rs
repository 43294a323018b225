use crate::challenge::{parse_challenge, ChallengeRating};
use crate::record::{CreatureRecord, FinalCreature};
use crate::ParseError;

/// Split each creature's Challenge into CR and XP, then sort by CR (stable).
///
/// A creature without a Challenge gets CR and XP of -1 and sorts first.
pub fn finalize(records: Vec<CreatureRecord>) -> Result<Vec<FinalCreature>, ParseError> {
    let mut rated = Vec::with_capacity(records.len());
    for record in records {
        let (cr, xp) = match record.challenge() {
            Some(raw) => parse_challenge(raw)?,
            None => {
                log::warn!("{} \"{}\" is missing 'Challenge'", record.category, record.class_name);
                (ChallengeRating::MISSING, -1)
            }
        };
        rated.push((cr, FinalCreature { cr: cr.to_fraction_string(), xp, record }));
    }
    rated.sort_by(|a, b| a.0.value().total_cmp(&b.0.value()));
    Ok(rated.into_iter().map(|(_, creature)| creature).collect())
}
