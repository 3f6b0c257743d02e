//! Builtin Category Definitions
//!
//! コード内で定義されるヘルプカテゴリ。
//! 投稿・ボランティアプロフィール・フィルタのすべてで共通。

use serde::{Deserialize, Serialize};

/// 未登録カテゴリに使うアイコン
pub const UNKNOWN_CATEGORY_ICON: &str = "📝";

/// 未登録カテゴリに使うカラークラス
pub const UNKNOWN_CATEGORY_COLOR: &str = "bg-gray-100 text-gray-700";

/// ビルトインカテゴリ定義（この順序がレジストリ順）
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        id: "food",
        label: "Food",
        icon: "🍽️",
        color: "bg-green-100 text-green-700 border-green-200",
        description: Some("Meals, food parcels and basic groceries."),
        resources: &[
            Resource {
                name: "Restaurants du Cœur",
                description: "Free meals • 42 Rue Championnet, 75018",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Secours Catholique",
                description: "Food distribution • 15 Rue de Maubeuge, 75009",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Croix-Rouge",
                description: "Food and basic supplies",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "legal",
        label: "Legal",
        icon: "⚖️",
        color: "bg-blue-100 text-blue-700 border-blue-200",
        description: Some("Residence permits, asylum procedures and legal advice."),
        resources: &[
            Resource {
                name: "La Cimade",
                description: "Free legal assistance • 176 Rue de Grenelle, 75007 Paris",
                link: None,
                urgent: false,
            },
            Resource {
                name: "GISTI",
                description: "Foreigners' rights • 3 Villa Marcès, 75011 Paris",
                link: None,
                urgent: false,
            },
            Resource {
                name: "OFPRA",
                description: "Asylum and protection",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "health",
        label: "Health",
        icon: "🏥",
        color: "bg-red-100 text-red-700 border-red-200",
        description: Some("Medical care, health coverage and emotional support."),
        resources: &[
            Resource {
                name: "SAMU - 15",
                description: "Medical emergencies",
                link: None,
                urgent: true,
            },
            Resource {
                name: "PASS",
                description: "Free care • Hôpital Saint-Louis",
                link: None,
                urgent: false,
            },
            Resource {
                name: "AME",
                description: "Free health coverage",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "housing",
        label: "Housing",
        icon: "🏠",
        color: "bg-purple-100 text-purple-700 border-purple-200",
        description: Some("Emergency shelter, social housing and tenancy questions."),
        resources: &[
            Resource {
                name: "SAMU Social - 115",
                description: "Emergency shelter 24/7, free",
                link: None,
                urgent: true,
            },
            Resource {
                name: "Logement Social (HLM)",
                description: "Rent adapted to income",
                link: Some("https://www.demande-logement-social.gouv.fr"),
                urgent: false,
            },
            Resource {
                name: "France Terre d'Asile",
                description: "24 Rue Marc Seguin, 75018 Paris • 01 53 04 39 99",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "work",
        label: "Work",
        icon: "💼",
        color: "bg-yellow-100 text-yellow-700 border-yellow-200",
        description: Some("Job search, CVs and diploma recognition."),
        resources: &[
            Resource {
                name: "France Travail",
                description: "Public employment service",
                link: Some("https://www.francetravail.fr"),
                urgent: false,
            },
            Resource {
                name: "ENIC-NARIC",
                description: "Diploma recognition",
                link: Some("https://www.france-education-international.fr"),
                urgent: false,
            },
            Resource {
                name: "Mission Locale",
                description: "For young people aged 16-25",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "education",
        label: "Education",
        icon: "📚",
        color: "bg-indigo-100 text-indigo-700 border-indigo-200",
        description: Some("Language courses, schooling and university access."),
        resources: &[
            Resource {
                name: "CASNAV",
                description: "Schooling for children • 12 Boulevard d'Indochine, 75019",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Universities",
                description: "Special programs for refugees",
                link: None,
                urgent: false,
            },
            Resource {
                name: "ENIC-NARIC",
                description: "Diploma validation",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "social",
        label: "Social",
        icon: "🤝",
        color: "bg-pink-100 text-pink-700 border-pink-200",
        description: Some("Social benefits, paperwork and community support."),
        resources: &[
            Resource {
                name: "Emmaüs Solidarité",
                description: "Social support • 4 Rue des Amandiers, 75020",
                link: None,
                urgent: false,
            },
            Resource {
                name: "CAF",
                description: "Financial aid",
                link: Some("https://www.caf.fr"),
                urgent: false,
            },
            Resource {
                name: "France Bénévolat",
                description: "Volunteering",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "clothes",
        label: "Clothes",
        icon: "👕",
        color: "bg-orange-100 text-orange-700 border-orange-200",
        description: Some("Clothing and shoes donations."),
        resources: &[
            Resource {
                name: "Croix-Rouge Vestiaire",
                description: "Free clothes • 43 Rue de Valmy, 93100",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Emmaüs",
                description: "Low-cost clothes and shoes",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Secours Catholique",
                description: "Social cloakrooms",
                link: None,
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "furniture",
        label: "Furniture",
        icon: "🪑",
        color: "bg-teal-100 text-teal-700 border-teal-200",
        description: Some("Furniture and household equipment."),
        resources: &[
            Resource {
                name: "Emmaüs",
                description: "Affordable furniture",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Ressourceries",
                description: "Second-hand furniture",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Donnons.org",
                description: "Online donations",
                link: Some("https://donnons.org"),
                urgent: false,
            },
        ],
    },
    BuiltinCategory {
        id: "transport",
        label: "Transport",
        icon: "🚗",
        color: "bg-cyan-100 text-cyan-700 border-cyan-200",
        description: Some("Public transport fares, driving licence and mobility."),
        resources: &[
            Resource {
                name: "Navigo",
                description: "Reduced fares available",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Mob'In France",
                description: "Driving licence training",
                link: None,
                urgent: false,
            },
            Resource {
                name: "Vélib'",
                description: "Public bicycles",
                link: None,
                urgent: false,
            },
        ],
    },
];

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリID（一意識別子、APIで使用）
    pub id: &'static str,
    /// 表示ラベル
    pub label: &'static str,
    /// アイコン
    pub icon: &'static str,
    /// カラークラス
    pub color: &'static str,
    /// 詳細説明
    pub description: Option<&'static str>,
    /// 外部リソース一覧
    pub resources: &'static [Resource],
}

/// カテゴリに紐づく外部リソース
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub name: &'static str,
    pub description: &'static str,
    pub link: Option<&'static str>,
    /// 緊急連絡先（115, 15 など）
    pub urgent: bool,
}

/// ランタイムカテゴリ定義
///
/// ビルトインから構築されるか、未登録IDのプレースホルダとして生成される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    /// レジストリに存在するか
    #[serde(default)]
    pub known: bool,
}

impl CategoryDef {
    /// 未登録IDのプレースホルダ（IDをラベルとして使う）
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            icon: UNKNOWN_CATEGORY_ICON.to_string(),
            color: UNKNOWN_CATEGORY_COLOR.to_string(),
            description: None,
            known: false,
        }
    }
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self {
            id: builtin.id.to_string(),
            label: builtin.label.to_string(),
            icon: builtin.icon.to_string(),
            color: builtin.color.to_string(),
            description: builtin.description.map(str::to_string),
            known: true,
        }
    }
}
