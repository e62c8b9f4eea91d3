use derive_builder::Builder;

use crate::data::{Course, CourseBreakdown, CourseFilter, Dish, MenuStats};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MenuError {
    #[error("{0}")]
    Validation(String),
    #[error("\"{0}\" is already on the menu")]
    Duplicate(String),
    #[error("no dish with id {0}")]
    NotFound(u64),
}

/// Candidate fields for a new dish. The id is assigned by the store; the
/// image is picked by the caller from the course before submitting.
#[derive(Builder, Clone)]
pub struct NewDishProps {
    #[builder(setter(into))]
    name: String,
    #[builder(setter(into))]
    description: String,
    course: Course,
    /// Raw price text as typed by the user, parsed and checked by `add`.
    #[builder(setter(into))]
    price: String,
    #[builder(setter(into))]
    image: String,
}

/// In-memory owner of the dish collection. One instance per screen
/// session, mutated synchronously by a single caller.
pub struct MenuStore {
    dishes: Vec<Dish>,
    // Seed snapshot kept aside so `recently_added` can tell session
    // additions apart from the fixed initial menu.
    baseline: Vec<Dish>,
    next_id: u64,
}

impl MenuStore {
    pub fn new(seed: Vec<Dish>) -> Self {
        let next_id = seed.iter().map(|d| d.id).max().map_or(1, |id| id + 1);
        Self {
            baseline: seed.clone(),
            dishes: seed,
            next_id,
        }
    }

    /// Validates and stores a new dish, newest first. The collection is
    /// left untouched on any failure.
    pub fn add(&mut self, props: NewDishProps) -> Result<Dish, MenuError> {
        let NewDishProps {
            name,
            description,
            course,
            price,
            image,
        } = props;

        let name = name.trim();
        if name.is_empty() {
            return Err(MenuError::Validation("please enter a dish name".into()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(MenuError::Validation("please enter a description".into()));
        }
        let price = price.trim();
        if price.is_empty() {
            return Err(MenuError::Validation("please enter a price".into()));
        }
        let price: f64 = price.parse().map_err(|_| {
            MenuError::Validation("please enter a valid price greater than 0".into())
        })?;
        if !price.is_finite() || price <= 0.0 {
            return Err(MenuError::Validation(
                "please enter a valid price greater than 0".into(),
            ));
        }

        if self
            .dishes
            .iter()
            .any(|dish| dish.name.eq_ignore_ascii_case(name))
        {
            return Err(MenuError::Duplicate(name.to_string()));
        }

        let dish = Dish {
            id: self.next_id,
            name: name.to_string(),
            description: description.to_string(),
            course,
            price,
            image,
        };
        self.next_id += 1;
        self.dishes.insert(0, dish.clone());
        tracing::info!("added dish {} ({})", dish.name, dish.course);

        Ok(dish)
    }

    pub fn remove(&mut self, id: u64) -> Result<(), MenuError> {
        let index = self
            .dishes
            .iter()
            .position(|dish| dish.id == id)
            .ok_or(MenuError::NotFound(id))?;
        let dish = self.dishes.remove(index);
        tracing::info!("removed dish {} ({})", dish.name, dish.id);
        Ok(())
    }

    /// Current collection order, optionally narrowed to one course.
    pub fn list(&self, filter: CourseFilter) -> Vec<&Dish> {
        self.dishes
            .iter()
            .filter(|dish| match filter {
                CourseFilter::All => true,
                CourseFilter::Only(course) => dish.course == course,
            })
            .collect()
    }

    /// Recomputed from the current snapshot on every call, nothing is
    /// cached between mutations.
    pub fn statistics(&self) -> MenuStats {
        let by_course = Course::ALL
            .into_iter()
            .map(|course| {
                let prices: Vec<f64> = self
                    .dishes
                    .iter()
                    .filter(|dish| dish.course == course)
                    .map(|dish| dish.price)
                    .collect();
                let breakdown = CourseBreakdown {
                    count: prices.len(),
                    average_price: if prices.is_empty() {
                        None
                    } else {
                        Some(prices.iter().sum::<f64>() / prices.len() as f64)
                    },
                };
                (course, breakdown)
            })
            .collect();

        MenuStats {
            total: self.dishes.len(),
            total_value: self.dishes.iter().map(|dish| dish.price).sum(),
            by_course,
        }
    }

    /// Dishes added during this session (id not in the baseline), newest
    /// first, at most `limit` entries.
    pub fn recently_added(&self, limit: usize) -> Vec<&Dish> {
        self.dishes
            .iter()
            .filter(|dish| !self.baseline.iter().any(|seed| seed.id == dish.id))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_menu() -> Vec<Dish> {
        vec![
            Dish {
                id: 1,
                name: "Grilled Steak".to_string(),
                description: "Juicy grilled steak with roasted vegetables".to_string(),
                course: Course::MainCourse,
                price: 185.0,
                image: "assets/grilled_steak.jpg".to_string(),
            },
            Dish {
                id: 2,
                name: "Chocolate Brownie".to_string(),
                description: "Warm chocolate brownie with vanilla ice cream".to_string(),
                course: Course::Dessert,
                price: 65.0,
                image: "assets/chocolate_brownie.jpg".to_string(),
            },
            Dish {
                id: 3,
                name: "Caesar Salad".to_string(),
                description: "Fresh Caesar salad with homemade dressing".to_string(),
                course: Course::Starter,
                price: 50.0,
                image: "assets/salad.jpg".to_string(),
            },
        ]
    }

    fn props(name: &str, price: &str) -> NewDishProps {
        NewDishPropsBuilder::default()
            .name(name)
            .description("desc")
            .course(Course::MainCourse)
            .price(price)
            .image("assets/fish_and_chips.jpg")
            .build()
            .unwrap()
    }

    #[test]
    fn add_prepends_trimmed_dish() {
        let mut store = MenuStore::new(seed_menu());
        let dish = store
            .add(
                NewDishPropsBuilder::default()
                    .name("  Fish and Chips  ")
                    .description("  Crispy battered fish  ")
                    .course(Course::MainCourse)
                    .price("120")
                    .image("assets/fish_and_chips.jpg")
                    .build()
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(dish.name, "Fish and Chips");
        assert_eq!(dish.description, "Crispy battered fish");
        assert_eq!(dish.price, 120.0);

        let all = store.list(CourseFilter::All);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, dish.id);

        let mains = store.list(CourseFilter::Only(Course::MainCourse));
        let names: Vec<&str> = mains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Fish and Chips", "Grilled Steak"]);
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut store = MenuStore::new(seed_menu());
        let a = store.add(props("Fish and Chips", "120")).unwrap();
        let b = store.add(props("Spring Rolls", "45")).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id > 3 && b.id > 3);
    }

    #[test]
    fn add_rejects_blank_fields() {
        let mut store = MenuStore::new(seed_menu());
        for p in [
            props("   ", "120"),
            NewDishPropsBuilder::default()
                .name("Fish and Chips")
                .description("  ")
                .course(Course::MainCourse)
                .price("120")
                .image("assets/fish_and_chips.jpg")
                .build()
                .unwrap(),
            props("Fish and Chips", "   "),
        ] {
            assert!(matches!(store.add(p), Err(MenuError::Validation(_))));
            assert_eq!(store.list(CourseFilter::All).len(), 3);
        }
    }

    #[test]
    fn add_rejects_bad_prices() {
        let mut store = MenuStore::new(seed_menu());
        for price in ["0", "-5", "abc", "inf", "NaN"] {
            let before: Vec<u64> = store.list(CourseFilter::All).iter().map(|d| d.id).collect();
            assert!(matches!(
                store.add(props("Fish and Chips", price)),
                Err(MenuError::Validation(_))
            ));
            let after: Vec<u64> = store.list(CourseFilter::All).iter().map(|d| d.id).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn add_rejects_case_insensitive_duplicates() {
        let mut store = MenuStore::new(seed_menu());
        let err = store.add(props("  grilled steak ", "99")).unwrap_err();
        assert_eq!(err, MenuError::Duplicate("grilled steak".to_string()));
        assert_eq!(store.statistics().total, 3);
    }

    #[test]
    fn remove_unknown_id_leaves_collection_unchanged() {
        let mut store = MenuStore::new(seed_menu());
        assert_eq!(store.remove(99), Err(MenuError::NotFound(99)));
        assert_eq!(store.list(CourseFilter::All).len(), 3);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut store = MenuStore::new(seed_menu());
        store.remove(2).unwrap();
        let names: Vec<&str> = store
            .list(CourseFilter::All)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["Grilled Steak", "Caesar Salad"]);
    }

    #[test]
    fn statistics_of_seed_menu() {
        let store = MenuStore::new(seed_menu());
        let stats = store.statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.total_value, 300.0);
        for course in Course::ALL {
            assert_eq!(stats.count_for(course), 1);
        }
        assert_eq!(stats.average_price_for(Course::Starter), Some(50.0));
        assert_eq!(stats.average_price_for(Course::MainCourse), Some(185.0));
        assert_eq!(stats.average_price_for(Course::Dessert), Some(65.0));
    }

    #[test]
    fn statistics_of_empty_menu() {
        let store = MenuStore::new(Vec::new());
        let stats = store.statistics();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.total_value, 0.0);
        for course in Course::ALL {
            assert_eq!(stats.count_for(course), 0);
            assert_eq!(stats.average_price_for(course), None);
        }
    }

    #[test]
    fn average_is_mean_of_course_prices() {
        let mut store = MenuStore::new(seed_menu());
        store
            .add(
                NewDishPropsBuilder::default()
                    .name("Bruschetta")
                    .description("Toasted bread with tomato")
                    .course(Course::Starter)
                    .price("70")
                    .image("assets/salad.jpg")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        let stats = store.statistics();
        assert_eq!(stats.count_for(Course::Starter), 2);
        assert_eq!(stats.average_price_for(Course::Starter), Some(60.0));
    }

    #[test]
    fn removing_last_dessert_reports_no_data() {
        let mut store = MenuStore::new(seed_menu());
        store.remove(2).unwrap();
        let stats = store.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.count_for(Course::Dessert), 0);
        assert_eq!(stats.average_price_for(Course::Dessert), None);
    }

    #[test]
    fn stats_total_matches_listing() {
        let mut store = MenuStore::new(seed_menu());
        store.add(props("Fish and Chips", "120")).unwrap();
        store.remove(1).unwrap();
        assert_eq!(store.statistics().total, store.list(CourseFilter::All).len());
    }

    #[test]
    fn recently_added_excludes_seed_and_is_bounded() {
        let mut store = MenuStore::new(seed_menu());
        assert!(store.recently_added(2).is_empty());

        store.add(props("Fish and Chips", "120")).unwrap();
        store.add(props("Spring Rolls", "45")).unwrap();
        store.add(props("Cheese Cake", "55")).unwrap();

        let recent: Vec<&str> = store
            .recently_added(2)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(recent, ["Cheese Cake", "Spring Rolls"]);
    }
}
