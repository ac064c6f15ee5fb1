use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Spending and income categories. Declaration order is the taxonomy order:
/// it decides which category wins when several keyword lists match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "еда")]
    Food,
    #[serde(rename = "транспорт")]
    Transport,
    #[serde(rename = "развлечения")]
    Entertainment,
    #[serde(rename = "здоровье")]
    Health,
    #[serde(rename = "коммуналка")]
    Utilities,
    #[serde(rename = "одежда")]
    Clothing,
    #[serde(rename = "образование")]
    Education,
    #[serde(rename = "техника")]
    Electronics,
    #[serde(rename = "красота")]
    Beauty,
    #[serde(rename = "зарплата")]
    Salary,
    #[serde(rename = "премия")]
    Bonus,
    #[serde(rename = "инвестиции")]
    Investments,
    #[serde(rename = "подарки")]
    Gifts,
    #[serde(rename = "фриланс")]
    Freelance,
    /// Fallback for inflows no income keyword recognised.
    #[serde(rename = "прочие доходы")]
    OtherIncome,
    /// Fallback for outflows no expense keyword recognised.
    #[serde(rename = "другое")]
    Other,
}

impl Category {
    /// Every category that carries keywords, in taxonomy order.
    pub const KEYWORDED: [Category; 14] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Health,
        Category::Utilities,
        Category::Clothing,
        Category::Education,
        Category::Electronics,
        Category::Beauty,
        Category::Salary,
        Category::Bonus,
        Category::Investments,
        Category::Gifts,
        Category::Freelance,
    ];

    /// Income categories in the order they are probed.
    pub const INCOME: [Category; 5] = [
        Category::Salary,
        Category::Bonus,
        Category::Investments,
        Category::Gifts,
        Category::Freelance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "еда",
            Category::Transport => "транспорт",
            Category::Entertainment => "развлечения",
            Category::Health => "здоровье",
            Category::Utilities => "коммуналка",
            Category::Clothing => "одежда",
            Category::Education => "образование",
            Category::Electronics => "техника",
            Category::Beauty => "красота",
            Category::Salary => "зарплата",
            Category::Bonus => "премия",
            Category::Investments => "инвестиции",
            Category::Gifts => "подарки",
            Category::Freelance => "фриланс",
            Category::OtherIncome => "прочие доходы",
            Category::Other => "другое",
        }
    }

    pub fn is_income(self) -> bool {
        matches!(
            self,
            Category::Salary
                | Category::Bonus
                | Category::Investments
                | Category::Gifts
                | Category::Freelance
                | Category::OtherIncome
        )
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Category::OtherIncome | Category::Other)
    }

    /// Built-in keywords, lowercase, in match order. Fallbacks have none.
    pub fn default_keywords(self) -> &'static [&'static str] {
        match self {
            Category::Food => &[
                "пятерочка", "магнит", "перекресток", "ашан", "лента", "продукты",
                "еда", "продуктовый", "супермаркет", "овощи", "фрукты", "молоко",
                "хлеб", "мясо", "рыба", "курочка", "гастроном", "бакалея", "спар",
            ],
            Category::Transport => &[
                "метро", "автобус", "такси", "бензин", "заправка", "транспорт",
                "проезд", "каршеринг", "яндекс.такси", "uber", "ситимобил",
                "транспортная карта", "парковка", "штраф гибдд",
            ],
            Category::Entertainment => &[
                "кино", "ресторан", "кафе", "концерт", "бар", "паб", "клуб",
                "билет", "игра", "хобби", "развлечения", "театр", "выставка",
                "музей", "боулинг", "караоке", "кофейня", "стейкхаус", "суши",
            ],
            Category::Health => &[
                "аптека", "врач", "больница", "лекарства", "медицина", "стоматолог",
                "поликлиника", "анализы", "медцентр", "витамины", "спортзал", "фитнес",
            ],
            Category::Utilities => &[
                "квартплата", "электричество", "вода", "газ", "интернет", "телефон",
                "связь", "жкх", "коммунальные", "аренда", "ипотека", "рко", "домофон",
            ],
            Category::Clothing => &[
                "одежда", "обувь", "магазин", "бутик", "шопинг", "бренд", "zara",
                "hm", "резерв", "ламиния", "обувной", "ателье", "трикотаж",
            ],
            Category::Education => &[
                "курсы", "учеба", "образование", "книги", "учебник", "репетитор",
                "школа", "университет", "онлайн-курс", "литература", "канцелярия",
            ],
            Category::Electronics => &[
                "техника", "электроника", "смартфон", "ноутбук", "компьютер",
                "телевизор", "dns", "м.видео", "ситилинк", "гаджет", "аксессуар",
            ],
            Category::Beauty => &[
                "парикмахер", "салон", "косметика", "косметолог", "маникюр",
                "стрижка", "spa", "уход", "парфюмерия", "рив гош", "лендри",
            ],
            Category::Salary => &[
                "зарплата", "оклад", "аванс", "заработная", "зп", "payroll",
                "начисление зп", "расчетный счет",
            ],
            Category::Bonus => &["премия", "бонус", "поощрение", "вознаграждение", "kpi"],
            Category::Investments => &[
                "дивиденды", "проценты", "инвестиции", "вклад", "депозит",
                "акции", "облигации", "купон", "инвест",
            ],
            Category::Gifts => &["подарок", "сюрприз", "поздравление", "перевод", "от друга"],
            Category::Freelance => &[
                "фриланс", "проект", "удаленная работа", "заказ", "исполнение",
            ],
            Category::OtherIncome | Category::Other => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::KEYWORDED
            .iter()
            .chain([Category::OtherIncome, Category::Other].iter())
            .copied()
            .find(|c| c.label() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Ordered keyword table used by the categorizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    entries: Vec<(Category, Vec<String>)>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        let entries = Category::KEYWORDED
            .iter()
            .map(|&c| {
                let words = c.default_keywords().iter().map(|k| k.to_string()).collect();
                (c, words)
            })
            .collect();
        Self { entries }
    }
}

impl Taxonomy {
    /// Appends extra keywords after the built-in ones. Keywords are lowercased;
    /// blanks and duplicates are skipped. Fallback categories are ignored.
    pub fn extend<I, S>(&mut self, category: Category, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some((_, words)) = self.entries.iter_mut().find(|(c, _)| *c == category) else {
            return;
        };
        for kw in keywords {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !words.contains(&kw) {
                words.push(kw);
            }
        }
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Income entries in the fixed probe order.
    pub fn income(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::INCOME.iter().map(move |&c| (c, self.keywords(c)))
    }

    /// Expense entries in taxonomy order.
    pub fn expenses(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.entries
            .iter()
            .filter(|(c, _)| !c.is_income())
            .map(|(c, words)| (*c, words.as_slice()))
    }
}
