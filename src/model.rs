use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour un soignant (acteur)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActorId(String);

impl ActorId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour une demande d'échange
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeId(String);

impl TradeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Garde (UTC). L'égalité porte sur l'identifiant seulement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shift {
    pub id: ShiftId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub department: String,
}

impl Shift {
    /// Crée une garde sans valider l'intervalle : la validation a lieu à l'ajout.
    pub fn new<D: Into<String>>(start: DateTime<Utc>, end: DateTime<Utc>, department: D) -> Self {
        Self {
            id: ShiftId::random(),
            start,
            end,
            department: department.into(),
        }
    }

    /// Crée une garde en validant que `end > start`.
    pub fn checked<D: Into<String>>(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        department: D,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("end must be strictly after start".to_string());
        }
        Ok(Self::new(start, end, department))
    }

    pub fn with_id(mut self, id: ShiftId) -> Self {
        self.id = id;
        self
    }

    /// Durée en heures entières (tronquée).
    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }

    pub fn is_valid_range(&self) -> bool {
        self.start < self.end
    }
}

impl PartialEq for Shift {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shift {}

/// Statut d'une demande d'échange. `Accepted` et `Declined` sont terminaux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TradeStatus {
    Pending,
    Accepted,
    Declined,
}

impl TradeStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TradeStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TradeStatus::Pending => "pending",
            TradeStatus::Accepted => "accepted",
            TradeStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demande d'échange : `original_shift` est la garde proposée au destinataire,
/// `requested_shift` celle qu'il cède en retour (absente = cession simple).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeRequest {
    pub id: TradeId,
    pub original_shift: Shift,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requested_shift: Option<Shift>,
    status: TradeStatus,
    pub is_incoming: bool,
    pub sender: ActorId,
}

impl TradeRequest {
    pub(crate) fn pending(
        original_shift: Shift,
        requested_shift: Option<Shift>,
        sender: ActorId,
        is_incoming: bool,
    ) -> Self {
        Self {
            id: TradeId::random(),
            original_shift,
            requested_shift,
            status: TradeStatus::Pending,
            is_incoming,
            sender,
        }
    }

    pub fn status(&self) -> TradeStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == TradeStatus::Pending
    }

    /// Badge « même service » : vrai seulement si une contrepartie existe.
    pub fn same_department(&self) -> bool {
        self.requested_shift
            .as_ref()
            .is_some_and(|r| r.department == self.original_shift.department)
    }

    /// Transition monotone : seul `Pending` peut être résolu.
    pub(crate) fn resolve(&mut self, to: TradeStatus) -> Result<(), TradeStatus> {
        if self.status.is_terminal() {
            return Err(self.status);
        }
        self.status = to;
        Ok(())
    }
}

/// Identité et service du soignant connecté, injectés par l'appelant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActorProfile {
    pub actor: ActorId,
    pub display_name: String,
    pub department: String,
}

impl ActorProfile {
    pub fn new<N: Into<String>, D: Into<String>>(actor: ActorId, display_name: N, department: D) -> Self {
        Self {
            actor,
            display_name: display_name.into(),
            department: department.into(),
        }
    }
}

impl Default for ActorProfile {
    fn default() -> Self {
        Self::new(ActorId::new("you"), "Dr. Smith", "Cardiology")
    }
}

/// État complet côté acteur : deux pools disjoints et l'historique des échanges.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    #[cfg_attr(feature = "serde", serde(default))]
    pub mine: Vec<Shift>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub available: Vec<Shift>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trades: Vec<TradeRequest>,
}

impl Board {
    pub fn find_mine(&self, id: &ShiftId) -> Option<&Shift> {
        self.mine.iter().find(|s| &s.id == id)
    }
    pub fn find_available(&self, id: &ShiftId) -> Option<&Shift> {
        self.available.iter().find(|s| &s.id == id)
    }
    pub fn find_trade(&self, id: &TradeId) -> Option<&TradeRequest> {
        self.trades.iter().find(|t| &t.id == id)
    }

    pub fn my_shifts_in<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a Shift> + 'a {
        self.mine.iter().filter(move |s| s.department == department)
    }

    pub fn available_in<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a Shift> + 'a {
        self.available.iter().filter(move |s| s.department == department)
    }

    /// Copie triée par début, pour l'affichage.
    pub fn sorted_by_start(shifts: &[Shift]) -> Vec<&Shift> {
        let mut out: Vec<&Shift> = shifts.iter().collect();
        out.sort_by_key(|s| s.start);
        out
    }

    /// Vrai si aucune garde n'apparaît dans les deux pools à la fois.
    pub fn pools_disjoint(&self) -> bool {
        self.mine
            .iter()
            .all(|m| self.available.iter().all(|a| a.id != m.id))
    }
}
