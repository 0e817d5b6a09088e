//! Staging/production reconciliation shared by the company and header workflows.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Anything carrying a last-modified timestamp.
pub trait Timestamped {
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Outcome of [`resolve_fresher`], tagged with where the record came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "record", rename_all = "camelCase")]
pub enum Freshest<S, P> {
    Staging(S),
    Production(P),
    None,
}

impl<S, P> Freshest<S, P> {
    pub fn is_staging(&self) -> bool {
        matches!(self, Freshest::Staging(_))
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Freshest::Production(_))
    }
}

/// Picks the record to present for editing.
///
/// Staging wins only when it is strictly newer; ties go to production.
pub fn resolve_fresher<S, P>(staging: Option<S>, production: Option<P>) -> Freshest<S, P>
where
    S: Timestamped,
    P: Timestamped,
{
    match (staging, production) {
        (Some(s), Some(p)) => {
            if s.updated_at() > p.updated_at() {
                Freshest::Staging(s)
            } else {
                Freshest::Production(p)
            }
        }
        (Some(s), None) => Freshest::Staging(s),
        (None, Some(p)) => Freshest::Production(p),
        (None, None) => Freshest::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[derive(Debug, Clone, PartialEq)]
    struct Stamp(Option<DateTime<Utc>>);

    impl Timestamped for Stamp {
        fn updated_at(&self) -> Option<DateTime<Utc>> {
            self.0
        }
    }

    fn at(secs: i64) -> Stamp {
        Stamp(Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)))
    }

    #[test]
    fn newer_staging_wins() {
        let res = resolve_fresher(Some(at(10)), Some(at(5)));
        assert_eq!(res, Freshest::Staging(at(10)));
    }

    #[test]
    fn newer_production_wins() {
        let res = resolve_fresher(Some(at(5)), Some(at(10)));
        assert_eq!(res, Freshest::Production(at(10)));
    }

    #[test]
    fn tie_goes_to_production() {
        let res = resolve_fresher(Some(at(7)), Some(at(7)));
        assert!(res.is_production());
    }

    #[test]
    fn single_side_is_returned() {
        assert!(resolve_fresher::<Stamp, Stamp>(Some(at(1)), None).is_staging());
        assert!(resolve_fresher::<Stamp, Stamp>(None, Some(at(1))).is_production());
        assert_eq!(resolve_fresher::<Stamp, Stamp>(None, None), Freshest::None);
    }

    #[test]
    fn serializes_with_source_tag() {
        let value = serde_json::to_value(Freshest::<u8, u8>::Staging(3)).unwrap();
        assert_eq!(value, serde_json::json!({ "source": "staging", "record": 3 }));
        let empty = serde_json::to_value(Freshest::<u8, u8>::None).unwrap();
        assert_eq!(empty, serde_json::json!({ "source": "none" }));
    }
}
