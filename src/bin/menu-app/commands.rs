use std::io::{BufRead, Write};

use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};
use menu_manager::data::{Course, CourseFilter, MenuStats};
use menu_manager::store::{MenuStore, NewDishPropsBuilder};

pub(super) const HELP: &str = "\
Commands:
  home                                      show menu statistics
  menu [all|starter|main|dessert]           list dishes, newest first
  add <name> ; <description> ; <course> ; <price>
  remove <id>                               delete a dish (asks to confirm)
  search <pattern>                          fuzzy search dish names
  export                                    dump menu and statistics as JSON
  help
  quit";

const RECENT_DISPLAY_LIMIT: usize = 2;

// The per-course display assets, fixed at build time. Picking an image is
// a screen concern, the store keeps whatever path it is handed.
fn dish_image(course: Course) -> &'static str {
    match course {
        Course::Starter => "assets/salad.jpg",
        Course::MainCourse => "assets/fish_and_chips.jpg",
        Course::Dessert => "assets/cheese_cake.jpg",
    }
}

fn format_currency(amount: f64) -> String {
    format!("R{amount:.2}")
}

pub(super) enum Command {
    Home,
    Menu(CourseFilter),
    Add {
        name: String,
        description: String,
        course: Course,
        price: String,
    },
    Remove(u64),
    Search(String),
    Export,
    Help,
    Quit,
}

impl Command {
    // I need:
    //  <verb> [arguments...]
    pub(super) fn new(line: &str) -> Result<Self, &'static str> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "home" | "stats" => Ok(Self::Home),
            "menu" | "list" => {
                if rest.is_empty() {
                    Ok(Self::Menu(CourseFilter::All))
                } else {
                    rest.parse().map(Self::Menu)
                }
            }
            "add" => {
                let fields: Vec<&str> = rest.split(';').map(str::trim).collect();
                if fields.len() != 4 {
                    return Err("expect: add <name> ; <description> ; <course> ; <price>");
                }
                Ok(Self::Add {
                    name: fields[0].to_string(),
                    description: fields[1].to_string(),
                    course: fields[2].parse()?,
                    price: fields[3].to_string(),
                })
            }
            "remove" | "delete" => {
                if rest.is_empty() {
                    return Err("expect: remove <id>");
                }
                let Ok(id) = rest.parse() else {
                    return Err("can not parse the id into a number");
                };
                Ok(Self::Remove(id))
            }
            "search" => {
                if rest.is_empty() {
                    return Err("expect: search <pattern>");
                }
                Ok(Self::Search(rest.to_string()))
            }
            "export" => Ok(Self::Export),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err("unexpected command"),
        }
    }

    // consumed the command
    pub(super) fn run(self, store: &mut MenuStore) -> anyhow::Result<()> {
        match self {
            Self::Home => print_home(store),
            Self::Menu(filter) => print_menu(store, filter),
            Self::Add {
                name,
                description,
                course,
                price,
            } => {
                let props = NewDishPropsBuilder::default()
                    .name(name)
                    .description(description)
                    .course(course)
                    .price(price)
                    .image(dish_image(course))
                    .build()?;
                match store.add(props) {
                    Ok(dish) => println!(
                        "Added {} ({}) at {}",
                        dish.name,
                        dish.course,
                        format_currency(dish.price)
                    ),
                    Err(e) => println!("Can not add dish: {e}"),
                }
            }
            Self::Remove(id) => {
                if !confirm(&format!("Remove dish {id}? [y/N] "))? {
                    println!("Kept.");
                    return Ok(());
                }
                match store.remove(id) {
                    Ok(()) => println!("Removed."),
                    Err(e) => println!("Can not remove dish: {e}"),
                }
            }
            Self::Search(pattern) => {
                let matcher = SkimMatcherV2::default();
                let result: String = store
                    .list(CourseFilter::All)
                    .into_iter()
                    .filter(|dish| matcher.fuzzy_match(&dish.name, &pattern).is_some())
                    .fold(String::new(), |sumed, dish| {
                        format!("{sumed}\n{}. {}", dish.id, dish.name)
                    });
                if result.is_empty() {
                    println!("No dish matches \"{pattern}\"");
                } else {
                    println!("{}", result.trim_start());
                }
            }
            Self::Export => {
                #[derive(serde::Serialize)]
                struct Snapshot<'a> {
                    menu: Vec<&'a menu_manager::data::Dish>,
                    stats: MenuStats,
                }
                let snapshot = Snapshot {
                    menu: store.list(CourseFilter::All),
                    stats: store.statistics(),
                };
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            Self::Help => println!("{HELP}"),
            // handled by the caller
            Self::Quit => {}
        }

        Ok(())
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn print_home(store: &MenuStore) {
    let stats = store.statistics();

    println!("Total Items: {}", stats.total);
    println!("Total Value: {}", format_currency(stats.total_value));
    println!(
        "Starters: {}  Mains: {}  Desserts: {}",
        stats.count_for(Course::Starter),
        stats.count_for(Course::MainCourse),
        stats.count_for(Course::Dessert),
    );

    println!("Average Prices by Course");
    for course in Course::ALL {
        let average = match stats.average_price_for(course) {
            Some(price) => format_currency(price),
            None => "N/A".to_string(),
        };
        println!("  {course}: {average}");
    }

    let recent = store.recently_added(RECENT_DISPLAY_LIMIT);
    if !recent.is_empty() {
        println!("Recently Added");
        for dish in recent {
            println!(
                "  {} - {} ({})",
                dish.name,
                format_currency(dish.price),
                dish.course
            );
        }
    }
}

fn print_menu(store: &MenuStore, filter: CourseFilter) {
    let dishes = store.list(filter);
    let header = match filter {
        CourseFilter::All => format!("Full Menu ({})", dishes.len()),
        CourseFilter::Only(course) => format!("{}s ({})", course, dishes.len()),
    };
    println!("{header}");

    if dishes.is_empty() {
        println!("No dishes in this category yet");
        return;
    }
    for dish in dishes {
        println!(
            "  [{}] {} ({}) - {}\n      {}",
            dish.id,
            dish.name,
            dish.course,
            format_currency(dish.price),
            dish.description
        );
    }
}
