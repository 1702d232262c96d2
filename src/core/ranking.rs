use crate::domain::model::ContactRecord;
use crate::domain::services::ServiceCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Emergency,
    NonEmergency,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "EMERGENCY" => Ok(Severity::Emergency),
            "NON_EMERGENCY" => Ok(Severity::NonEmergency),
            other => Err(format!(
                "unknown severity '{}', expected EMERGENCY or NON_EMERGENCY",
                other
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Emergency => f.write_str("EMERGENCY"),
            Severity::NonEmergency => f.write_str("NON_EMERGENCY"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedContact<'a> {
    pub contact: &'a ContactRecord,
    pub score: u32,
    pub exact_matches: usize,
    pub emergency_capable: bool,
}

/// Why a contact was or was not offered for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub included: bool,
    pub missing: Vec<ServiceCode>,
    pub emergency_capable: bool,
    pub reason: &'static str,
}

pub fn assess(contact: &ContactRecord, required: &[ServiceCode], severity: Severity) -> Assessment {
    let missing: Vec<ServiceCode> = required
        .iter()
        .copied()
        .filter(|code| !contact.offers(*code))
        .collect();
    let emergency_capable = contact.offers(ServiceCode::EmergencyPlumbing);
    let excluded_for_emergency = severity == Severity::Emergency && !emergency_capable;

    let (included, reason) = if !missing.is_empty() {
        (false, "Excluded: missing required services")
    } else if excluded_for_emergency {
        (false, "Excluded: not emergency-capable")
    } else {
        (true, "Included: supports all required services and passes emergency gate")
    };

    Assessment {
        included,
        missing,
        emergency_capable,
        reason,
    }
}

/// Contacts offering every required service, best first. Emergencies also
/// require `EMERGENCY_PLUMBING`.
pub fn rank_for_job<'a>(
    catalog: &'a [ContactRecord],
    required: &[ServiceCode],
    severity: Severity,
) -> Vec<RankedContact<'a>> {
    let mut ranked: Vec<RankedContact<'a>> = catalog
        .iter()
        .filter(|contact| assess(contact, required, severity).included)
        .map(|contact| {
            let exact_matches = required.iter().filter(|code| contact.offers(**code)).count();
            let emergency_capable = contact.offers(ServiceCode::EmergencyPlumbing);
            let mut score = exact_matches as u32 * 100;
            match severity {
                Severity::NonEmergency => score += 10,
                Severity::Emergency if emergency_capable => score += 50,
                Severity::Emergency => {}
            }
            RankedContact {
                contact,
                score,
                exact_matches,
                emergency_capable,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, services: &[ServiceCode]) -> ContactRecord {
        ContactRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            phone: None,
            email: None,
            location: None,
            rating_note: None,
            services: services.to_vec(),
        }
    }

    fn catalog() -> Vec<ContactRecord> {
        vec![
            contact("Toilets Only", &[ServiceCode::ToiletRepair]),
            contact(
                "All Hours",
                &[ServiceCode::EmergencyPlumbing, ServiceCode::ToiletRepair],
            ),
            contact("Drains", &[ServiceCode::DrainCleaningFixture]),
        ]
    }

    #[test]
    fn test_requires_all_services() {
        let catalog = catalog();
        let ranked = rank_for_job(&catalog, &[ServiceCode::ToiletRepair], Severity::NonEmergency);

        let names: Vec<&str> = ranked.iter().map(|r| r.contact.name.as_str()).collect();
        assert_eq!(names, vec!["Toilets Only", "All Hours"]);
        assert!(ranked.iter().all(|r| r.score == 110));
    }

    #[test]
    fn test_emergency_gate() {
        let catalog = catalog();
        let ranked = rank_for_job(&catalog, &[ServiceCode::ToiletRepair], Severity::Emergency);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].contact.name, "All Hours");
        assert_eq!(ranked[0].score, 150);
        assert!(ranked[0].emergency_capable);
    }

    #[test]
    fn test_assess_reasons() {
        let catalog = catalog();

        let missing = assess(&catalog[2], &[ServiceCode::ToiletRepair], Severity::NonEmergency);
        assert!(!missing.included);
        assert_eq!(missing.missing, vec![ServiceCode::ToiletRepair]);
        assert_eq!(missing.reason, "Excluded: missing required services");

        let gated = assess(&catalog[0], &[ServiceCode::ToiletRepair], Severity::Emergency);
        assert!(!gated.included);
        assert_eq!(gated.reason, "Excluded: not emergency-capable");
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("EMERGENCY".parse::<Severity>(), Ok(Severity::Emergency));
        assert_eq!("non-emergency".parse::<Severity>(), Ok(Severity::NonEmergency));
        assert!("urgent".parse::<Severity>().is_err());
    }
}
