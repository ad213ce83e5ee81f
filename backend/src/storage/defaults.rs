//! Built-in seed data used when a collection is missing or unreadable.

use shared::{Habit, HabitPeriod, Kid, ThemeColor};

/// The two kids the app starts with
pub fn default_kids() -> Vec<Kid> {
    vec![
        Kid {
            id: "k1".to_string(),
            name: "Tí Nị".to_string(),
            avatar: "https://picsum.photos/id/64/200/200".to_string(),
            theme_color: ThemeColor::Pink,
            current_score: 0,
            redeemed_points: 0,
        },
        Kid {
            id: "k2".to_string(),
            name: "Bơm".to_string(),
            avatar: "https://picsum.photos/id/237/200/200".to_string(),
            theme_color: ThemeColor::Blue,
            current_score: 0,
            redeemed_points: 0,
        },
    ]
}

/// The recurring habits the app starts with
pub fn default_habits() -> Vec<Habit> {
    let both = vec!["k1".to_string(), "k2".to_string()];

    vec![
        Habit {
            id: "h5".to_string(),
            title: "Thức dậy đúng giờ".to_string(),
            icon: "⏰".to_string(),
            assigned_to: both.clone(),
            period: HabitPeriod::Morning,
            order: 0,
            date: None,
        },
        Habit {
            id: "h1".to_string(),
            title: "Đánh răng buổi sáng".to_string(),
            icon: "🦷".to_string(),
            assigned_to: both.clone(),
            period: HabitPeriod::Morning,
            order: 1,
            date: None,
        },
        Habit {
            id: "h2".to_string(),
            title: "Ăn hết phần rau".to_string(),
            icon: "🥦".to_string(),
            assigned_to: both.clone(),
            period: HabitPeriod::Afternoon,
            order: 0,
            date: None,
        },
        Habit {
            id: "h4".to_string(),
            title: "Hoàn thành nhiệm vụ trước khi ngủ".to_string(),
            icon: "📝".to_string(),
            assigned_to: both.clone(),
            period: HabitPeriod::Evening,
            order: 0,
            date: None,
        },
        Habit {
            id: "h3".to_string(),
            title: "Đi ngủ trước 9h".to_string(),
            icon: "😴".to_string(),
            assigned_to: both.clone(),
            period: HabitPeriod::Evening,
            order: 1,
            date: None,
        },
        screen_time_habit(),
    ]
}

/// The built-in "no screens" habit, re-injected into older stored data that
/// predates it (see the habit repository's load rules)
pub fn screen_time_habit() -> Habit {
    Habit {
        id: "h6".to_string(),
        title: "Không xem iPad và ti vi quá 1H giờ".to_string(),
        icon: "📵".to_string(),
        assigned_to: vec!["k1".to_string(), "k2".to_string()],
        period: HabitPeriod::Evening,
        order: 2,
        date: None,
    }
}
