//! Built-in keyword catalog and the TOML format used to override it.

use serde::Deserialize;

/// Business keywords per sector of activity
pub const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "informatique",
        &[
            "développement web", "application mobile", "base de données", "cybersécurité",
            "infrastructure réseau", "cloud computing", "intelligence artificielle", "blockchain",
            "ERP", "CRM", "système d'information", "maintenance informatique",
            "formation informatique", "audit informatique", "hébergement web",
            "logiciel de gestion", "e-commerce", "digitalisation", "transformation digitale",
        ],
    ),
    (
        "bâtiment",
        &[
            "construction", "rénovation", "génie civil", "architecture", "maçonnerie",
            "plomberie", "électricité", "climatisation", "isolation thermique",
            "étanchéité", "carrelage", "peinture", "menuiserie", "charpente",
            "terrassement", "assainissement", "voirie", "béton armé", "infrastructure",
        ],
    ),
    (
        "transport",
        &[
            "transport routier", "logistique", "livraison", "déménagement",
            "transport de marchandises", "transport de personnes", "affrètement",
            "entreposage", "supply chain", "douane", "transit", "fret",
            "transport international", "messagerie", "distribution",
        ],
    ),
    (
        "santé",
        &[
            "équipement médical", "fournitures médicales", "imagerie médicale",
            "laboratoire", "pharmacie", "dispositifs médicaux", "stérilisation",
            "ambulance", "télémédecine", "dossier médical électronique",
            "maintenance médicale", "formation médicale", "hygiène hospitalière",
        ],
    ),
    (
        "éducation",
        &[
            "formation professionnelle", "e-learning", "équipement scolaire",
            "mobilier scolaire", "fournitures scolaires", "laboratoire pédagogique",
            "bibliothèque", "cantine scolaire", "transport scolaire",
            "cours particuliers", "certification", "formation continue",
        ],
    ),
    (
        "agriculture",
        &[
            "machinisme agricole", "irrigation", "semences", "engrais", "pesticides",
            "élevage", "arboriculture", "maraîchage", "céréaliculture",
            "transformation agroalimentaire", "certification bio", "conseil agricole",
            "vétérinaire", "équipement agricole",
        ],
    ),
    (
        "énergie",
        &[
            "énergie solaire", "énergie éolienne", "électricité", "gaz naturel",
            "pétrole", "efficacité énergétique", "audit énergétique",
            "installation électrique", "maintenance énergétique", "smart grid",
            "biomasse", "géothermie", "hydrogène vert",
        ],
    ),
    (
        "tourisme",
        &[
            "hôtellerie", "restauration", "agence de voyage", "guide touristique",
            "transport touristique", "animation", "événementiel", "traiteur",
            "réceptif", "écotourisme", "tourisme culturel", "hébergement",
        ],
    ),
    (
        "industrie",
        &[
            "production industrielle", "maintenance industrielle", "contrôle qualité",
            "automation", "robotique", "mécanique de précision", "usinage",
            "soudure", "assemblage", "packaging", "logistique industrielle",
            "sécurité industrielle", "environnement industriel",
        ],
    ),
    (
        "finance",
        &[
            "comptabilité", "audit financier", "conseil fiscal", "banque",
            "assurance", "crédit", "investissement", "gestion de patrimoine",
            "expertise comptable", "commissariat aux comptes", "financement",
            "microfinance", "trésorerie",
        ],
    ),
    (
        "communication",
        &[
            "marketing digital", "publicité", "communication digitale", "réseaux sociaux",
            "création graphique", "impression", "événementiel", "relations presse",
            "stratégie de communication", "brand content", "web marketing",
            "référencement SEO", "community management",
        ],
    ),
    (
        "environnement",
        &[
            "traitement des eaux", "gestion des déchets", "recyclage",
            "dépollution", "étude d'impact", "énergies renouvelables",
            "développement durable", "ISO 14001", "économie circulaire",
            "biodiversité", "changement climatique",
        ],
    ),
    (
        "sécurité",
        &[
            "sécurité privée", "surveillance", "gardiennage", "système d'alarme",
            "vidéosurveillance", "contrôle d'accès", "sécurité incendie",
            "sécurité informatique", "audit sécurité", "formation sécurité",
            "transport de fonds", "protection rapprochée",
        ],
    ),
    (
        "textile",
        &[
            "confection", "broderie", "impression textile", "maroquinerie",
            "chaussure", "mode", "design textile", "teinture", "tissage",
            "tricotage", "accessoires", "prêt-à-porter", "export textile",
        ],
    ),
    (
        "conseil",
        &[
            "conseil en management", "formation professionnelle", "audit organisationnel",
            "accompagnement", "coaching", "stratégie d'entreprise", "ressources humaines",
            "optimisation des processus", "conduite du changement", "certification",
            "normalisation", "évaluation",
        ],
    ),
];

/// Canonical term -> variants
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("développement web", &["dev web", "création web", "site web", "application web"]),
    ("intelligence artificielle", &["IA", "AI", "machine learning", "deep learning"]),
    ("cybersécurité", &["sécurité informatique", "sécurité IT", "protection données"]),
    ("infrastructure réseau", &["réseau informatique", "administration réseau"]),
    ("génie civil", &["travaux publics", "BTP", "construction civile"]),
    ("transport routier", &["transport terrestre", "routage"]),
    ("énergie solaire", &["photovoltaïque", "solaire PV", "panneaux solaires"]),
    ("marketing digital", &["marketing numérique", "webmarketing", "digital marketing"]),
];

/// Generic procurement keywords, the first `GENERIC_FALLBACK_LEN` are the
/// fallback suggestion
pub const GENERIC_KEYWORDS: &[&str] = &[
    "fourniture", "installation", "maintenance", "formation", "conseil",
    "audit", "certification", "contrôle", "gestion", "développement",
    "création", "conception", "réalisation", "livraison", "support",
    "assistance", "expertise", "étude", "analyse", "optimisation",
];

pub const GENERIC_FALLBACK_LEN: usize = 10;

/// French and transliterated Arabic stop words, plus procurement boilerplate
pub const STOP_WORDS: &[&str] = &[
    // French
    "le", "la", "les", "un", "une", "des", "du", "de", "et", "ou", "mais",
    "donc", "or", "ni", "car", "que", "qui", "quoi", "dont", "où", "ce",
    "se", "sa", "son", "ses", "leur", "leurs", "nous", "vous", "ils", "elles",
    "je", "tu", "il", "elle", "on", "dans", "sur", "avec", "par", "pour",
    "sans", "sous", "vers", "chez", "entre", "jusque", "depuis", "pendant",
    "avant", "après", "très", "plus", "moins", "aussi", "tout", "tous",
    "toute", "toutes", "autre", "autres", "même", "mêmes", "tel", "telle",
    "comme", "comment", "quand", "pourquoi", "combien", "est", "sont", "être",
    "avoir", "faire", "dire", "aller", "voir", "savoir", "pouvoir", "vouloir",
    "devoir", "falloir", "venir", "prendre", "donner", "mettre", "partir",
    "sortir", "passer", "rester", "tenir", "porter", "suivre", "vivre", "mourir",
    // procurement boilerplate
    "selon", "concernant", "relative", "relatif", "conformément", "cadre",
    "objet", "référence", "numéro", "date", "délai", "montant", "prix",
    "coût", "budget", "offre", "demande", "appel", "marché", "public",
    "cahier", "charges", "technique", "administratif", "financier",
    // transliterated Arabic
    "al", "el", "wa", "fi", "min", "ila", "an", "ma", "li", "bi",
];

/// Catalog file layout
///
/// ```toml
/// [[sectors]]
/// name = "informatique"
/// keywords = ["développement web", "ERP"]
///
/// [[synonyms]]
/// term = "développement web"
/// variants = ["dev web", "site web"]
/// ```
///
/// Missing `stop_words` or `generic_keywords` fall back to the built-in lists.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub sectors: Vec<SectorEntry>,
    #[serde(default)]
    pub synonyms: Vec<SynonymEntry>,
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    #[serde(default)]
    pub generic_keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectorEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SynonymEntry {
    pub term: String,
    pub variants: Vec<String>,
}
