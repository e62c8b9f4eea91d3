use std::io::{BufRead, Write};

use menu_manager::data::{Course, Dish};
use menu_manager::store::MenuStore;

mod commands;

fn seed_menu() -> Vec<Dish> {
    vec![
        Dish {
            id: 1,
            name: "Grilled Steak".to_string(),
            description: "Juicy grilled steak with roasted vegetables and pepper sauce"
                .to_string(),
            course: Course::MainCourse,
            price: 185.0,
            image: "assets/grilled_steak.jpg".to_string(),
        },
        Dish {
            id: 2,
            name: "Chocolate Brownie".to_string(),
            description: "Warm chocolate brownie with vanilla ice cream topping".to_string(),
            course: Course::Dessert,
            price: 65.0,
            image: "assets/chocolate_brownie.jpg".to_string(),
        },
        Dish {
            id: 3,
            name: "Caesar Salad".to_string(),
            description: "Fresh Caesar salad with a delicious homemade dressing".to_string(),
            course: Course::Starter,
            price: 50.0,
            image: "assets/salad.jpg".to_string(),
        },
    ]
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("fail to setup logging");

    let mut store = MenuStore::new(seed_menu());

    println!("Menu Manager");
    println!("Welcome, Chef Christoffel!");
    println!("Type `help` for the list of commands.\n");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match commands::Command::new(&line) {
            Ok(commands::Command::Quit) => break,
            Ok(command) => command.run(&mut store)?,
            Err(hint) => println!("{hint}\n\n{}", commands::HELP),
        }
    }

    Ok(())
}
