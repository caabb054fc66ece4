//! Static seed records served when the store is unreachable.
//!
//! The same records seed the in-memory store in demo mode.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::db::models::{FaqEntry, GovernmentMember, JobPosting, NewsItem, Service, TreasuryEntry};
use crate::db::repository::Entity;

/// Records of an entity type to fall back on.
pub trait Fallback: Entity {
    fn fallback() -> Vec<Self>;
}

fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    title: &str,
    description: &str,
    duration: &str,
    requirements: &str,
    procedure: &str,
    department: &str,
    cost: &str,
    apply_url: &str,
    views: u64,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        requirements: requirements.to_string(),
        procedure: procedure.to_string(),
        department: department.to_string(),
        cost: cost.to_string(),
        apply_url: Some(apply_url.to_string()),
        centers: Vec::new(),
        views,
        created_at: created,
        updated_at: updated,
    }
}

impl Fallback for Service {
    fn fallback() -> Vec<Self> {
        let mut services = vec![
            service(
                "1",
                "Получение паспорта",
                "Оформление и получение паспорта гражданина E-Davis",
                "30 дней",
                "Заявление, фотография, документ, удостоверяющий личность",
                "Подача заявления, оплата госпошлины, получение паспорта",
                "Департамент внутренних дел",
                "1000",
                "https://example.com/apply-passport",
                1500,
                day(2023, 1, 15),
                day(2023, 6, 20),
            ),
            service(
                "2",
                "Регистрация бизнеса",
                "Регистрация юридического лица или индивидуального предпринимателя",
                "5 рабочих дней",
                "Заявление, устав, документы учредителей",
                "Подача документов, оплата госпошлины, получение свидетельства",
                "Департамент экономического развития",
                "5000",
                "https://example.com/apply-business",
                1200,
                day(2023, 2, 10),
                day(2023, 7, 15),
            ),
            service(
                "3",
                "Получение водительского удостоверения",
                "Оформление и получение водительского удостоверения",
                "10 рабочих дней",
                "Заявление, медицинская справка, документ об обучении",
                "Сдача экзаменов, оплата госпошлины, получение удостоверения",
                "Департамент транспорта",
                "2000",
                "https://example.com/apply-license",
                1000,
                day(2023, 3, 5),
                day(2023, 8, 10),
            ),
            service(
                "4",
                "Регистрация недвижимости",
                "Регистрация права собственности на недвижимое имущество",
                "7 рабочих дней",
                "Заявление, документы на недвижимость, документ, удостоверяющий личность",
                "Подача документов, оплата госпошлины, получение свидетельства",
                "Департамент имущественных отношений",
                "3000",
                "https://example.com/apply-property",
                900,
                day(2023, 4, 20),
                day(2023, 9, 5),
            ),
            service(
                "5",
                "Получение разрешения на строительство",
                "Оформление разрешения на строительство объекта",
                "30 рабочих дней",
                "Заявление, проектная документация, правоустанавливающие документы",
                "Подача документов, рассмотрение, получение разрешения",
                "Департамент строительства",
                "10000",
                "https://example.com/apply-building",
                800,
                day(2023, 5, 15),
                day(2023, 10, 1),
            ),
            service(
                "6",
                "Регистрация брака",
                "Государственная регистрация заключения брака",
                "1 месяц",
                "Заявление, документы, удостоверяющие личность",
                "Подача заявления, оплата госпошлины, регистрация брака",
                "Департамент ЗАГС",
                "500",
                "https://example.com/apply-marriage",
                700,
                day(2023, 6, 10),
                day(2023, 11, 5),
            ),
        ];
        Self::ORDER.sort(&mut services);
        services
    }
}

impl Fallback for NewsItem {
    fn fallback() -> Vec<Self> {
        vec![
            NewsItem {
                id: "1".to_string(),
                title: "Запущен новый портал государственных услуг".to_string(),
                summary: "Портал E-Davis объединяет услуги, новости и вакансии в одном месте"
                    .to_string(),
                content: "Жители могут подавать заявления онлайн и следить за их статусом."
                    .to_string(),
                category: "Цифровизация".to_string(),
                image_url: None,
                published_at: day(2023, 11, 20),
            },
            NewsItem {
                id: "2".to_string(),
                title: "Изменение графика работы центров обслуживания".to_string(),
                summary: "Центры обслуживания граждан переходят на работу без выходных".to_string(),
                content: "Новый график действует с первого декабря.".to_string(),
                category: "Объявления".to_string(),
                image_url: None,
                published_at: day(2023, 11, 12),
            },
            NewsItem {
                id: "3".to_string(),
                title: "Открыт прием заявок на гранты для малого бизнеса".to_string(),
                summary: "Предприниматели могут получить поддержку на развитие производства"
                    .to_string(),
                content: "Заявки принимаются в электронном виде до конца года.".to_string(),
                category: "Экономика".to_string(),
                image_url: None,
                published_at: day(2023, 10, 30),
            },
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: &str,
    title: &str,
    department: &str,
    location: &str,
    description: &str,
    requirements: &str,
    salary: &str,
    published: DateTime<Utc>,
    deadline: DateTime<Utc>,
    email: &str,
    phone: &str,
) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: title.to_string(),
        department: department.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        requirements: requirements.to_string(),
        salary: salary.to_string(),
        employment_type: "Полная занятость".to_string(),
        published_at: published,
        deadline: Some(deadline),
        contact_email: email.to_string(),
        contact_phone: phone.to_string(),
    }
}

impl Fallback for JobPosting {
    fn fallback() -> Vec<Self> {
        vec![
            job(
                "1",
                "Специалист по обслуживанию клиентов",
                "Департамент государственных услуг",
                "г. Дэвис, ул. Центральная, 10",
                "Консультирование граждан по вопросам получения государственных услуг, прием и обработка заявлений, работа с документами.",
                "Высшее образование, опыт работы с клиентами от 1 года, знание законодательства в сфере государственных услуг, уверенный пользователь ПК.",
                "30000-40000",
                day(2023, 11, 15),
                day(2023, 12, 15),
                "hr@E-Davis.gov",
                "+7 (123) 456-78-90",
            ),
            job(
                "2",
                "Разработчик программного обеспечения",
                "Департамент цифрового развития",
                "г. Дэвис, ул. Технологическая, 5",
                "Разработка и поддержка программного обеспечения для государственных информационных систем, участие в проектах по цифровизации государственных услуг.",
                "Высшее техническое образование, опыт разработки от 2 лет, опыт работы с базами данных.",
                "70000-90000",
                day(2023, 11, 10),
                day(2023, 12, 10),
                "it@E-Davis.gov",
                "+7 (123) 456-78-91",
            ),
            job(
                "3",
                "Юрист",
                "Департамент юридического обеспечения",
                "г. Дэвис, ул. Правовая, 15",
                "Правовое сопровождение деятельности государственных органов, подготовка юридических заключений, представление интересов в суде.",
                "Высшее юридическое образование, опыт работы от 3 лет, знание административного и гражданского права.",
                "50000-70000",
                day(2023, 11, 5),
                day(2023, 12, 5),
                "legal@E-Davis.gov",
                "+7 (123) 456-78-92",
            ),
            job(
                "4",
                "Специалист по связям с общественностью",
                "Департамент информационной политики",
                "г. Дэвис, ул. Медийная, 7",
                "Взаимодействие со СМИ, подготовка пресс-релизов и информационных материалов, организация пресс-конференций и брифингов.",
                "Высшее образование в сфере журналистики или PR, опыт работы от 2 лет, навыки написания текстов.",
                "40000-60000",
                day(2023, 10, 25),
                day(2023, 11, 25),
                "pr@E-Davis.gov",
                "+7 (123) 456-78-93",
            ),
            job(
                "5",
                "Аналитик данных",
                "Департамент цифрового развития",
                "г. Дэвис, ул. Технологическая, 5",
                "Анализ данных о предоставлении государственных услуг, подготовка аналитических отчетов, разработка рекомендаций по улучшению качества услуг.",
                "Высшее образование в области математики или статистики, опыт работы с данными от 2 лет, знание SQL.",
                "60000-80000",
                day(2023, 10, 20),
                day(2023, 11, 20),
                "analytics@E-Davis.gov",
                "+7 (123) 456-78-94",
            ),
        ]
    }
}

impl Fallback for FaqEntry {
    fn fallback() -> Vec<Self> {
        let at = day(2023, 9, 1);
        vec![
            FaqEntry {
                id: "1".to_string(),
                question: "Как получить доступ к услугам портала?".to_string(),
                answer: "Для доступа к услугам необходимо зарегистрироваться и войти в личный кабинет."
                    .to_string(),
                created_at: at,
                updated_at: at,
            },
            FaqEntry {
                id: "2".to_string(),
                question: "Где узнать статус поданного заявления?".to_string(),
                answer: "Статус заявлений отображается в разделе 'Мои обращения' вашего кабинета."
                    .to_string(),
                created_at: at,
                updated_at: at,
            },
        ]
    }
}

/// The roster page shows nothing rather than a made-up government.
impl Fallback for GovernmentMember {
    fn fallback() -> Vec<Self> {
        Vec::new()
    }
}

/// An unreachable ledger reads as empty.
impl Fallback for TreasuryEntry {
    fn fallback() -> Vec<Self> {
        Vec::new()
    }
}

/// Demo roster for the in-memory store. Not used as a read fallback.
pub fn demo_government() -> Vec<GovernmentMember> {
    vec![
        GovernmentMember {
            id: "1".to_string(),
            full_name: "Иван Петров".to_string(),
            position: "Губернатор".to_string(),
            department: "Администрация губернатора".to_string(),
            photo_url: None,
            is_governor: true,
            order_number: 0,
        },
        GovernmentMember {
            id: "2".to_string(),
            full_name: "Мария Соколова".to_string(),
            position: "Министр цифрового развития".to_string(),
            department: "Департамент цифрового развития".to_string(),
            photo_url: None,
            is_governor: false,
            order_number: 1,
        },
    ]
}

/// Demo ledger for the in-memory store. Not used as a read fallback.
pub fn demo_treasury() -> Vec<TreasuryEntry> {
    [(2023, 9, 1, 120_000.0), (2023, 10, 1, 135_500.0), (2023, 11, 1, 128_250.0)]
        .into_iter()
        .enumerate()
        .filter_map(|(i, (y, m, d, amount))| {
            Some(TreasuryEntry {
                id: (i + 1).to_string(),
                amount,
                date: Some(NaiveDate::from_ymd_opt(y, m, d)?),
                comment: None,
                created_at: None,
            })
        })
        .collect()
}
