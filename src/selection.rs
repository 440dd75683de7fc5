//! Selection manager
//!
//! Computes the next selection snapshot for a Select/Deselect action.
//! The caller owns the authoritative `SelectedServices`; every operation here
//! takes a borrowed snapshot and returns a new one.
//!
//! # Select rules (first match wins)
//!
//! | # | Condition                                   | Result   |
//! |---|---------------------------------------------|----------|
//! | 1 | already selected                            | rejected |
//! | 2 | main service                                | added    |
//! | 3 | BlurayPackage, VideoRecording selected      | added    |
//! | 4 | other additional service, any main selected | added    |
//! | 5 | anything else                               | rejected |
//!
//! # Deselect rules
//!
//! Deselecting a main service cascades: BlurayPackage goes when
//! VideoRecording is gone, TwoDayEvent goes when no main service is left.
//! WeddingSession is never cascaded. Cascades are checked against the
//! resulting selection, whether or not the service was actually present.
//! Additional services are removed without cascade.
//!
//! Rejected actions are not errors: the input is returned unchanged and the
//! reason is reported through `ActionEffect::Rejected`.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoEnumIterator};
use thiserror::Error;
use tracing::debug;

use crate::types::ServiceType;

/// Order-preserving set of selected services
///
/// Insertion order is kept for display; duplicates are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ServiceType>", into = "Vec<ServiceType>")]
pub struct SelectedServices(Vec<ServiceType>);

impl SelectedServices {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, service: ServiceType) -> bool {
        self.0.contains(&service)
    }

    /// True when Photography or VideoRecording is selected
    pub fn has_main_service(&self) -> bool {
        self.0.iter().any(|s| s.is_main())
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceType> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[ServiceType] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply one action and return the next snapshot
    pub fn apply(&self, action: SelectionAction) -> Self {
        apply_action(self, action)
    }

    fn insert(&mut self, service: ServiceType) -> bool {
        if self.contains(service) {
            return false;
        }
        self.0.push(service);
        true
    }

    fn remove(&mut self, service: ServiceType) -> bool {
        let before = self.0.len();
        self.0.retain(|s| *s != service);
        self.0.len() != before
    }
}

impl FromIterator<ServiceType> for SelectedServices {
    /// Collects services, keeping the first occurrence of duplicates.
    ///
    /// This does not check dependency rules; use `apply_actions` to build a
    /// selection that honours them.
    fn from_iter<I: IntoIterator<Item = ServiceType>>(iter: I) -> Self {
        let mut selected = Self::new();
        for service in iter {
            selected.insert(service);
        }
        selected
    }
}

impl From<Vec<ServiceType>> for SelectedServices {
    fn from(services: Vec<ServiceType>) -> Self {
        services.into_iter().collect()
    }
}

impl From<SelectedServices> for Vec<ServiceType> {
    fn from(selected: SelectedServices) -> Self {
        selected.0
    }
}

impl<'a> IntoIterator for &'a SelectedServices {
    type Item = ServiceType;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ServiceType>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for SelectedServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(none)");
        }
        let names: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Select or Deselect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString)]
pub enum ActionKind {
    #[strum(serialize = "Select")]
    Select,
    #[strum(serialize = "Deselect")]
    Deselect,
}

/// A user action against the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionAction {
    pub kind: ActionKind,
    pub service: ServiceType,
}

impl SelectionAction {
    pub const fn select(service: ServiceType) -> Self {
        Self {
            kind: ActionKind::Select,
            service,
        }
    }

    pub const fn deselect(service: ServiceType) -> Self {
        Self {
            kind: ActionKind::Deselect,
            service,
        }
    }
}

impl fmt::Display for SelectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.service)
    }
}

/// Why a Select action left the selection unchanged
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum RejectionReason {
    #[error("{service} is already selected")]
    AlreadySelected { service: ServiceType },

    #[error("{service} requires VideoRecording to be selected")]
    RequiresVideoRecording { service: ServiceType },

    #[error("{service} requires Photography or VideoRecording to be selected")]
    RequiresMainService { service: ServiceType },
}

/// What an action did to the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEffect {
    Added(ServiceType),
    Removed {
        service: ServiceType,
        /// False when the service was not selected to begin with
        was_selected: bool,
        /// Dependents dropped along with a main service
        cascaded: Vec<ServiceType>,
    },
    Rejected(RejectionReason),
}

impl ActionEffect {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl fmt::Display for ActionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(service) => write!(f, "added {service}"),
            Self::Removed {
                service,
                was_selected: false,
                ..
            } => write!(f, "{service} was not selected"),
            Self::Removed {
                service, cascaded, ..
            } if cascaded.is_empty() => write!(f, "removed {service}"),
            Self::Removed {
                service, cascaded, ..
            } => {
                let names: Vec<String> = cascaded.iter().map(|s| s.to_string()).collect();
                write!(f, "removed {service} (also removed {})", names.join(", "))
            }
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// Next selection plus what happened to get there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub selection: SelectedServices,
    pub effect: ActionEffect,
}

/// Apply an action, returning the next selection.
///
/// Rejected actions return a copy of `current`.
pub fn apply_action(current: &SelectedServices, action: SelectionAction) -> SelectedServices {
    evaluate_action(current, action).selection
}

/// Apply an action and report its effect.
pub fn evaluate_action(current: &SelectedServices, action: SelectionAction) -> SelectionOutcome {
    match action.kind {
        ActionKind::Select => select(current, action.service),
        ActionKind::Deselect => deselect(current, action.service),
    }
}

/// Fold a sequence of actions starting from the empty selection.
pub fn apply_actions<I>(actions: I) -> SelectedServices
where
    I: IntoIterator<Item = SelectionAction>,
{
    actions
        .into_iter()
        .fold(SelectedServices::new(), |selected, action| {
            apply_action(&selected, action)
        })
}

/// Whether a Select of `service` would be accepted.
pub fn is_selectable(current: &SelectedServices, service: ServiceType) -> bool {
    select_rejection(current, service).is_none()
}

/// Services a Select action would currently add, in declaration order.
pub fn selectable_services(current: &SelectedServices) -> Vec<ServiceType> {
    ServiceType::iter()
        .filter(|s| is_selectable(current, *s))
        .collect()
}

fn select(current: &SelectedServices, service: ServiceType) -> SelectionOutcome {
    match select_rejection(current, service) {
        None => {
            let mut selection = current.clone();
            selection.insert(service);
            SelectionOutcome {
                selection,
                effect: ActionEffect::Added(service),
            }
        }
        Some(reason) => {
            debug!(%service, %reason, "select rejected");
            SelectionOutcome {
                selection: current.clone(),
                effect: ActionEffect::Rejected(reason),
            }
        }
    }
}

// Order matters: rule 1 must run before rule 2 so main services are not
// duplicated.
fn select_rejection(current: &SelectedServices, service: ServiceType) -> Option<RejectionReason> {
    if current.contains(service) {
        return Some(RejectionReason::AlreadySelected { service });
    }

    if service.is_main() {
        return None;
    }

    if service == ServiceType::BlurayPackage {
        return if current.contains(ServiceType::VideoRecording) {
            None
        } else {
            Some(RejectionReason::RequiresVideoRecording { service })
        };
    }

    if service.is_additional() && current.has_main_service() {
        return None;
    }

    Some(RejectionReason::RequiresMainService { service })
}

fn deselect(current: &SelectedServices, service: ServiceType) -> SelectionOutcome {
    let mut selection = current.clone();
    let was_selected = selection.remove(service);
    let mut cascaded = Vec::new();

    if service.is_main() {
        if !selection.contains(ServiceType::VideoRecording)
            && selection.remove(ServiceType::BlurayPackage)
        {
            cascaded.push(ServiceType::BlurayPackage);
        }
        if !selection.has_main_service() && selection.remove(ServiceType::TwoDayEvent) {
            cascaded.push(ServiceType::TwoDayEvent);
        }
    }

    if !cascaded.is_empty() {
        debug!(%service, ?cascaded, "deselect cascaded");
    }

    SelectionOutcome {
        selection,
        effect: ActionEffect::Removed {
            service,
            was_selected,
            cascaded,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ServiceType::*;

    fn selected(services: &[ServiceType]) -> SelectedServices {
        services.iter().copied().collect()
    }

    #[test]
    fn test_select_main_service_always_added() {
        let result = apply_action(&SelectedServices::new(), SelectionAction::select(Photography));
        assert_eq!(result, selected(&[Photography]));

        let result = apply_action(&result, SelectionAction::select(VideoRecording));
        assert_eq!(result, selected(&[Photography, VideoRecording]));
    }

    #[test]
    fn test_select_duplicate_rejected() {
        let current = selected(&[Photography]);
        let outcome = evaluate_action(&current, SelectionAction::select(Photography));

        assert_eq!(outcome.selection, current);
        assert_eq!(
            outcome.effect,
            ActionEffect::Rejected(RejectionReason::AlreadySelected {
                service: Photography
            })
        );
    }

    #[test]
    fn test_bluray_requires_video_recording() {
        let current = selected(&[Photography]);
        let outcome = evaluate_action(&current, SelectionAction::select(BlurayPackage));
        assert_eq!(outcome.selection, current);
        assert_eq!(
            outcome.effect,
            ActionEffect::Rejected(RejectionReason::RequiresVideoRecording {
                service: BlurayPackage
            })
        );

        let current = selected(&[VideoRecording]);
        let result = apply_action(&current, SelectionAction::select(BlurayPackage));
        assert_eq!(result, selected(&[VideoRecording, BlurayPackage]));
    }

    #[test]
    fn test_additional_requires_main_service() {
        for service in [TwoDayEvent, WeddingSession] {
            let outcome = evaluate_action(&SelectedServices::new(), SelectionAction::select(service));
            assert!(outcome.selection.is_empty());
            assert_eq!(
                outcome.effect,
                ActionEffect::Rejected(RejectionReason::RequiresMainService { service })
            );

            let result = apply_action(&selected(&[Photography]), SelectionAction::select(service));
            assert_eq!(result, selected(&[Photography, service]));
        }
    }

    #[test]
    fn test_deselect_video_cascades_bluray() {
        let current = selected(&[VideoRecording, BlurayPackage]);
        let outcome = evaluate_action(&current, SelectionAction::deselect(VideoRecording));

        assert!(outcome.selection.is_empty());
        assert_eq!(
            outcome.effect,
            ActionEffect::Removed {
                service: VideoRecording,
                was_selected: true,
                cascaded: vec![BlurayPackage],
            }
        );
    }

    #[test]
    fn test_deselect_last_main_cascades_two_day_event_but_not_wedding() {
        let current = selected(&[Photography, TwoDayEvent, WeddingSession]);
        let result = apply_action(&current, SelectionAction::deselect(Photography));
        assert_eq!(result, selected(&[WeddingSession]));
    }

    #[test]
    fn test_deselect_additional_has_no_cascade() {
        let current = selected(&[VideoRecording, BlurayPackage, TwoDayEvent]);
        let result = apply_action(&current, SelectionAction::deselect(BlurayPackage));
        assert_eq!(result, selected(&[VideoRecording, TwoDayEvent]));
    }

    #[test]
    fn test_deselect_absent_service_reports_not_selected() {
        let current = selected(&[VideoRecording]);
        let outcome = evaluate_action(&current, SelectionAction::deselect(Photography));

        assert_eq!(outcome.selection, current);
        assert_eq!(
            outcome.effect,
            ActionEffect::Removed {
                service: Photography,
                was_selected: false,
                cascaded: vec![],
            }
        );
    }

    #[test]
    fn test_selectable_services() {
        assert_eq!(
            selectable_services(&SelectedServices::new()),
            vec![Photography, VideoRecording]
        );
        assert_eq!(
            selectable_services(&selected(&[Photography])),
            vec![VideoRecording, TwoDayEvent, WeddingSession]
        );
        assert_eq!(
            selectable_services(&selected(&[VideoRecording])),
            vec![Photography, BlurayPackage, TwoDayEvent, WeddingSession]
        );
    }

    #[test]
    fn test_from_iter_drops_duplicates() {
        let services = selected(&[Photography, Photography, VideoRecording]);
        assert_eq!(services.as_slice(), &[Photography, VideoRecording]);
    }

    #[test]
    fn test_effect_display() {
        let effect = ActionEffect::Removed {
            service: Photography,
            was_selected: true,
            cascaded: vec![TwoDayEvent],
        };
        assert_eq!(effect.to_string(), "removed Photography (also removed TwoDayEvent)");

        let effect = ActionEffect::Rejected(RejectionReason::RequiresVideoRecording {
            service: BlurayPackage,
        });
        assert_eq!(
            effect.to_string(),
            "rejected: BlurayPackage requires VideoRecording to be selected"
        );
    }

    #[test]
    fn test_selection_serializes_as_list() {
        let services = selected(&[VideoRecording, BlurayPackage]);
        let json = serde_json::to_string(&services).unwrap();
        assert_eq!(json, r#"["VideoRecording","BlurayPackage"]"#);
    }

    #[test]
    fn test_action_json_shape() {
        let action: SelectionAction =
            serde_json::from_str(r#"{"kind":"Deselect","service":"TwoDayEvent"}"#).unwrap();
        assert_eq!(action, SelectionAction::deselect(TwoDayEvent));
        assert_eq!(action.to_string(), "Deselect TwoDayEvent");
    }
}
