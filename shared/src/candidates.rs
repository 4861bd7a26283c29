#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: &'static str,
    pub name: &'static str,
    pub alias: Option<&'static str>,
}

/// The ballot is fixed at deploy time; the backend only ever sees these ids.
pub const CANDIDATES: &[Candidate] = &[
    Candidate { id: "c1", name: "Rosyidi", alias: Some("Pak Eko") },
    Candidate { id: "c2", name: "Rodi Atmaja", alias: Some("Pak Osi") },
    Candidate { id: "c3", name: "Marja Ulpah", alias: Some("Pak Alesa") },
    Candidate { id: "c4", name: "Sar'i", alias: Some("Pk Ogi") },
    Candidate { id: "c5", name: "H. Azhar Hamidi", alias: Some("H. Dadik") },
    Candidate { id: "c6", name: "Khairul Muttaqin", alias: Some("Jae Lolo") },
];

pub fn all() -> &'static [Candidate] {
    CANDIDATES
}

pub fn find(id: &str) -> Option<&'static Candidate> {
    CANDIDATES.iter().find(|c| c.id == id)
}

impl Candidate {
    /// Case-insensitive substring match against name or alias.
    /// A blank query matches every candidate.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&q)
            || self.alias.map_or(false, |a| a.to_lowercase().contains(&q))
    }
}

pub fn search(query: &str) -> Vec<&'static Candidate> {
    CANDIDATES.iter().filter(|c| c.matches(query)).collect()
}
