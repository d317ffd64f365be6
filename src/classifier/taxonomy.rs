use crate::domain::Category;

/// Keyword set of one taxonomy category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDefinition {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// The built-in taxonomy, listed in `Category` order.
///
/// Single words match their letter-suffixed inflections ("protest" also hits
/// "protesters"); phrases only match the exact word sequence.
pub static TAXONOMY: &[CategoryDefinition] = &[
    CategoryDefinition {
        category: Category::InternalConflict,
        keywords: &[
            "civil unrest",
            "protest",
            "domestic policy",
            "wealth inequality",
            "political polarization",
            "social tension",
            "class struggle",
            "income gap",
            "wealth gap",
            "social divide",
            "domestic conflict",
            "internal struggle",
            "civil disobedience",
            "political divide",
            "social unrest",
            "populism",
            "nationalism",
            "domestic politics",
            "culture war",
            "identity politics",
            "political instability",
        ],
    },
    CategoryDefinition {
        category: Category::ExternalConflict,
        keywords: &[
            "international tension",
            "tariff",
            "trade war",
            "border dispute",
            "geopolitical risk",
            "military conflict",
            "diplomatic crisis",
            "foreign policy",
            "international relation",
            "global competition",
            "economic warfare",
            "currency war",
            "territorial dispute",
            "international sanction",
            "global power",
            "superpower competition",
            "military buildup",
            "alliance",
            "proxy war",
            "cold war",
            "international order",
            "global governance",
        ],
    },
    CategoryDefinition {
        category: Category::EconomicIndicators,
        keywords: &[
            "interest rate",
            "inflation",
            "gdp",
            "unemployment",
            "debt level",
            "monetary policy",
            "fiscal policy",
            "central bank",
            "federal reserve",
            "economic growth",
            "recession",
            "economic cycle",
            "market crash",
            "financial crisis",
            "credit cycle",
            "debt cycle",
            "productivity",
            "economic output",
            "consumer spending",
            "business investment",
            "economic indicator",
            "economic data",
            "economic report",
        ],
    },
];
