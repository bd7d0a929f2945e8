//! Seed data the app starts with. Nothing is persisted between runs.

use chrono::NaiveDate;

use crate::{
    Article, Course, DEFAULT_LOAN_COLOR, Expense, ExpenseCategory, LearningCatalog, Loan, Money,
    Post, Stream, TermUnit,
};

fn loan(
    id: u32,
    title: &str,
    subtitle: &str,
    amounts: (i64, i64, i64),
    interest_rate: f64,
    term: (u32, TermUnit),
) -> Loan {
    let (total, remaining, monthly) = amounts;
    Loan {
        id,
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        total_amount: Money::new(total),
        remaining_amount: Money::new(remaining),
        monthly_payment: Money::new(monthly),
        interest_rate,
        term: term.0,
        term_unit: term.1,
        // recomputed when the ledger is built
        progress: 0,
        color: DEFAULT_LOAN_COLOR.to_string(),
    }
}

pub fn loans() -> Vec<Loan> {
    vec![
        loan(
            1,
            "Ипотека",
            "Квартира в Алматы",
            (15_000_000, 12_500_000, 150_000),
            12.5,
            (15, TermUnit::Years),
        ),
        loan(
            2,
            "Автокредит",
            "Toyota Camry",
            (5_000_000, 3_200_000, 85_000),
            18.0,
            (5, TermUnit::Years),
        ),
        loan(
            3,
            "Потребительский кредит",
            "Ремонт",
            (1_000_000, 450_000, 45_000),
            22.5,
            (24, TermUnit::Months),
        ),
    ]
}

/// Sample expenses, newest first.
pub fn expenses() -> Vec<Expense> {
    let entries = [
        ("Продукты в магазине", ExpenseCategory::Food, 7, 15_000),
        ("Бензин", ExpenseCategory::Transport, 6, 8_000),
        ("Онлайн курс", ExpenseCategory::Education, 5, 25_000),
        ("Ресторан", ExpenseCategory::Food, 4, 12_000),
        ("Кофе", ExpenseCategory::Entertainment, 3, 5_000),
    ];

    entries
        .into_iter()
        .filter_map(|(title, category, day, amount)| {
            let date = NaiveDate::from_ymd_opt(2025, 11, day)?;
            Some(Expense::new(title, category, date, Money::new(amount)))
        })
        .collect()
}

pub fn posts() -> Vec<Post> {
    vec![
        Post::new(
            "Асем Нурланова",
            "AH",
            "2 часа назад",
            "Поделюсь своим опытом: за 6 месяцев удалось погасить потребительский кредит на 2 года раньше! Главное - вносить даже небольшие дополнительные платежи ...",
        )
        .with_reactions(24, 8),
        Post::new(
            "Ерлан Сапаров",
            "EC",
            "5 часов назад",
            "Вопрос: как лучше распределить дополнительные средства - закрыть мелкий кредит полностью или внести часть в ипотеку? У меня есть потребительский на 50...",
        )
        .with_avatar_color("#4f46e5")
        .with_reactions(15, 12),
        Post::new(
            "Динара Жумабаева",
            "ДЖ",
            "1 день назад",
            "Начала отслеживать расходы через платформу - шок! Оказалось, на доставку еды трачу 60К в месяц. Сократила вдвое и теперь эти деньги идут на досрочное ...",
        )
        .with_avatar_color("#059669")
        .with_reactions(31, 6),
    ]
}

pub fn catalog() -> LearningCatalog {
    let course = |title: &str, description: &str, date: &str, duration: &str| Course {
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        duration: duration.to_string(),
    };
    let stream = |title: &str, description: &str, starts: &str, participants| Stream {
        title: title.to_string(),
        description: description.to_string(),
        starts: starts.to_string(),
        participants,
    };
    let article = |title: &str, summary: &str| Article {
        title: title.to_string(),
        summary: summary.to_string(),
    };

    LearningCatalog {
        courses: vec![
            course(
                "Стратегии досрочного погашения кредитов",
                "Узнайте, как эффективно планировать дополнительные платежи и сократить срок кредита.",
                "15 ноября, 2025",
                "90 минут",
            ),
            course(
                "Финансовая грамотность: основы управления долгами",
                "Комплексный курс по управлению личными финансами и минимизации долговой нагрузки.",
                "20 ноября, 2025",
                "120 минут",
            ),
        ],
        streams: vec![
            stream(
                "Q&A с финансовым консультантом",
                "Прямой эфир: задайте свои вопросы о кредитах, инвестициях и финансовом планировании.",
                "10 ноября, 18:00",
                234,
            ),
            stream(
                "Разбор реальных кейсов: как выбраться из долгов",
                "Анализ успешных историй погашения кредитов от участников сообщества.",
                "12 ноября, 19:00",
                189,
            ),
        ],
        articles: vec![
            article(
                "10 способов сократить ежемесячные расходы",
                "Практические советы по оптимизации бюджета без снижения качества жизни.",
            ),
            article(
                "Как работает рефинансирование кредитов в Казахстане",
                "Подробное руководство по рефинансированию: когда это выгодно и на что обратить внимание.",
            ),
            article(
                "Психология денег: почему мы тратим больше, чем планируем",
                "Разбираем психологические ловушки и учимся принимать осознанные финансовые решения.",
            ),
        ],
    }
}
