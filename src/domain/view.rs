// Menu selections and the view they resolve to
use super::device::DeviceRange;
use super::production::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainSection {
    #[default]
    Dashboard,
    AddCard,
    Kpi,
    Employees,
    Configuration,
}

impl MainSection {
    pub const ALL: [MainSection; 5] = [
        MainSection::Dashboard,
        MainSection::AddCard,
        MainSection::Kpi,
        MainSection::Employees,
        MainSection::Configuration,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            MainSection::Dashboard => "dashboard",
            MainSection::AddCard => "add-card",
            MainSection::Kpi => "kpi",
            MainSection::Employees => "employees",
            MainSection::Configuration => "configuration",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            MainSection::Dashboard => "🏠 Tableau de bord",
            MainSection::AddCard => "➕ Ajouter une carte",
            MainSection::Kpi => "📊 KPI",
            MainSection::Employees => "👥 Employés",
            MainSection::Configuration => "⚙️ Configurations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubSection {
    #[default]
    Device,
    Production,
}

impl SubSection {
    pub const ALL: [SubSection; 2] = [SubSection::Device, SubSection::Production];

    pub fn slug(self) -> &'static str {
        match self {
            SubSection::Device => "device",
            SubSection::Production => "production",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            SubSection::Device => "📡 Dispositif",
            SubSection::Production => "🏭 Production de blister",
        }
    }
}

/// Everything a single render pass can show.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Device(DeviceRange),
    Production(Granularity),
    AddCard,
    Kpi,
    Employees,
    Configuration,
    /// Dashboard picked without a sub-section: nothing to draw yet.
    AwaitingSelection,
}

impl View {
    pub fn main_section(&self) -> MainSection {
        match self {
            View::Device(_) | View::Production(_) | View::AwaitingSelection => MainSection::Dashboard,
            View::AddCard => MainSection::AddCard,
            View::Kpi => MainSection::Kpi,
            View::Employees => MainSection::Employees,
            View::Configuration => MainSection::Configuration,
        }
    }

    pub fn sub_section(&self) -> Option<SubSection> {
        match self {
            View::Device(_) => Some(SubSection::Device),
            View::Production(_) => Some(SubSection::Production),
            _ => None,
        }
    }

    /// Title and info message of the sections that have no content yet.
    pub fn placeholder(&self) -> Option<(&'static str, &'static str)> {
        match self {
            View::AddCard => Some((
                "➕ Ajouter une carte",
                "Fonction à implémenter : formulaire ou ajout dynamique d'une nouvelle carte au dashboard.",
            )),
            View::Kpi => Some((
                "📊 Indicateurs de performance",
                "Affichage de KPI globaux (à définir selon besoins métier).",
            )),
            View::Employees => Some((
                "👥 Gestion des employés",
                "Liste des utilisateurs, affectations et droits (à implémenter).",
            )),
            View::Configuration => Some((
                "⚙️ Paramètres du système",
                "Options de configuration et préférences générales.",
            )),
            _ => None,
        }
    }
}
