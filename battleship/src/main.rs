// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    fmt,
    io::{self, BufRead, Write},
    thread,
    time::{Duration, Instant},
};

use clap::{App, Arg, ArgMatches};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use broadside::{
    Cell, Coordinate, Game, GameConfig, GameError, Orientation, Outcome, Session, ShipClass,
    Side, TurnReport,
};

fn main() -> io::Result<()> {
    env_logger::init();

    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line battleship against a hunt/target computer opponent.")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("SIZE")
                .help("width and height of both grids")
                .takes_value(true)
                .validator(|v| validate_number(&v, 5, 26)),
        )
        .arg(
            Arg::with_name("delay")
                .short("d")
                .long("delay")
                .value_name("MILLIS")
                .help("how long the computer thinks before firing back")
                .takes_value(true)
                .validator(|v| validate_number(&v, 0, u64::max_value())),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed the random number generator for a reproducible game")
                .takes_value(true)
                .validator(|v| validate_number(&v, 0, u64::max_value())),
        )
        .arg(
            Arg::with_name("random_fleet")
                .short("r")
                .long("random-fleet")
                .help("skip manual placement and place your fleet at random"),
        )
        .get_matches();

    let config = build_config(&matches);
    let random_fleet = matches.is_present("random_fleet");
    debug!("starting with {:?}", config);

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut session = Session::new(config);

    loop {
        if random_fleet {
            if let Err(err) = session.randomize_remaining() {
                println!("Could not place your fleet: {}", err);
                return Ok(());
            }
        } else {
            choose_placements(&mut session, &mut input)?;
        }
        if let Err(err) = session.start() {
            println!("Could not start the game: {}", err);
            return Ok(());
        }
        match play(&mut session, &mut input)? {
            AfterGame::Restart => {
                session.restart();
            }
            AfterGame::Quit => return Ok(()),
        }
    }
}

/// Check that a command line value is a number in `[min, max]`.
fn validate_number(value: &str, min: u64, max: u64) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(n) if n >= min && n <= max => Ok(()),
        Ok(n) => Err(format!("{} is not in range [{}, {}]", n, min, max)),
        Err(err) => Err(err.to_string()),
    }
}

/// Build the game config from the command line. Values were checked by the validators.
fn build_config(matches: &ArgMatches) -> GameConfig {
    let mut config = GameConfig::default();
    if let Some(size) = matches.value_of("size").and_then(|v| v.parse().ok()) {
        config = config.with_size(size);
    }
    if let Some(delay) = matches.value_of("delay").and_then(|v| v.parse().ok()) {
        config = config.with_opponent_delay(Duration::from_millis(delay));
    }
    if let Some(seed) = matches.value_of("seed").and_then(|v| v.parse().ok()) {
        config = config.with_seed(seed);
    }
    config
}

/// Parse a ship name or abbreviation into its catalog index.
fn parse_ship(name: &str) -> Option<usize> {
    let class = match name {
        "cv" | "carrier" => ShipClass::Carrier,
        "bb" | "battleship" => ShipClass::Battleship,
        "ca" | "cl" | "cruiser" => ShipClass::Cruiser,
        "ss" | "sub" | "submarine" => ShipClass::Submarine,
        "dd" | "destroyer" => ShipClass::Destroyer,
        _ => return None,
    };
    ShipClass::ALL.iter().position(|&c| c == class)
}

/// Parse a cell given either as `row,col` numbers or as a letter row and 1-based column
/// such as `b7`.
fn parse_coord(text: &str) -> Option<Coordinate> {
    static NUMERIC: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<row>[0-9]+)(?:\s*,\s*|\s+)(?P<col>[0-9]+)$").unwrap());
    static LABEL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<row>[a-z])\s*(?P<col>[0-9]+)$").unwrap());

    if let Some(captures) = NUMERIC.captures(text) {
        let row = captures["row"].parse().ok()?;
        let col = captures["col"].parse().ok()?;
        Some(Coordinate::new(row, col))
    } else if let Some(captures) = LABEL.captures(text) {
        let row = (captures["row"].as_bytes()[0] - b'a') as isize;
        let col: isize = captures["col"].parse().ok()?;
        Some(Coordinate::new(row, col - 1))
    } else {
        None
    }
}

/// Choose placements for all ships using input from the player.
fn choose_placements(
    session: &mut Session,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Done,
        Place(usize, Coordinate, Orientation),
        Unplace(usize),
        Clear,
        RandomizeRest,
        Help,
    }
    println!();
    println!("Place ships. Type help or ? for commands.");
    loop {
        println!();
        /// Matcher for commands with args.
        static PLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:place|put)\s+
        (?P<ship>\w+)\s+
        (?:(?:at|on|to|->|=>)\s+)?
        (?P<coord>[a-z0-9]+(?:\s*,\s*[0-9]+)?)\s+
        (?P<dir>\w+)$",
            )
            .unwrap()
        });
        static UNPLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:un-?place|remove)\s+
        (?P<ship>\w+)$",
            )
            .unwrap()
        });

        let game = session.game();
        if game.is_fleet_placed() {
            println!("All ships placed, type done to start the game");
        } else {
            let pending: Vec<_> = game
                .pending_ships()
                .map(|idx| game.catalog()[idx].name())
                .collect();
            println!("Remaining ships to place: {}", pending.join(", "));
        }
        println!("Your current board setup:");
        show_revealed_board(game);
        println!();

        let cmd = input.read_input_lower(">", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" => Some(Command::RandomizeRest),
            "done" | "start" => Some(Command::Done),
            "clear" => Some(Command::Clear),
            other => if let Some(captures) = PLACE.captures(other) {
                let ship = match parse_ship(&captures["ship"]) {
                    Some(ship) => ship,
                    None => {
                        println!("invalid ship: {}, choose \"carrier\", \"battleship\", \"cruiser\", \"submarine\", or \"destroyer\"", &captures["ship"]);
                        return None;
                    }
                };
                let coord = match parse_coord(&captures["coord"]) {
                    Some(coord) => coord,
                    None => {
                        println!("invalid position: {}, use <row>,<col> or a label like b7", &captures["coord"]);
                        return None;
                    }
                };
                let dir = match &captures["dir"] {
                    "h" | "horizontal" | "right" | "r" | "across" => Orientation::Horizontal,
                    "v" | "vertical" | "down" | "d" => Orientation::Vertical,
                    other => {
                        println!("invalid direction {}, choose \"horizontal\" or \"vertical\"", other);
                        return None;
                    }
                };
                Some(Command::Place(ship, coord, dir))
            } else if let Some(captures) = UNPLACE.captures(other) {
                match &captures["ship"] {
                    "all" => Some(Command::Clear),
                    name => match parse_ship(name) {
                        Some(ship) => Some(Command::Unplace(ship)),
                        None => {
                            println!("invalid ship: {}, choose \"carrier\", \"battleship\", \"cruiser\", \"submarine\", \"destroyer\", or \"all\"", name);
                            None
                        }
                    },
                }
            } else {
                println!("Invalid ship-placement command \"{}\". Use '?' for help", other);
                None
            }
        })?;

        let result = match cmd {
            Command::Done if session.game().is_fleet_placed() => break,
            Command::Done => {
                println!("You must place all your ships first!");
                Ok(())
            }
            Command::Place(ship, start, dir) => session.place_ship(ship, start, dir).map(|_| ()),
            Command::Unplace(ship) => session.remove_ship(ship).map(|_| ()),
            Command::Clear => session.clear_ships(),
            Command::RandomizeRest => session.randomize_remaining(),
            Command::Help => {
                println!(
                    "Available Commands:
    done                         if all ships are placed, start the game.
    place <ship> <row>,<col> <dir>
                                 place the ship with its first cell at the given position.
        Positions may also be written as a row letter and column number, like b7.
        Possible directions are \"horizontal\" (extends right) and \"vertical\" (extends down).
    unplace <ship>               clear the placement of the specified ship.
        Additionally \"all\" may be specified to clear all placements.
    clear                        clears all ship placements.
    randomize                    randomize the placements of the remaining ships.

Available Ships:
    \"carrier\" (\"cv\")
    \"battleship\" (\"bb\")
    \"cruiser\" (\"cl\")
    \"submarine\" (\"ss\")
    \"destroyer\" (\"dd\")",
                );
                Ok(())
            }
        };
        match result {
            Ok(()) => {}
            Err(GameError::InvalidPlacement(reason)) => println!("Invalid placement: {}.", reason),
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}

/// What to do once a game ends.
enum AfterGame {
    Restart,
    Quit,
}

/// Alternate player shots and opponent replies until the game ends.
fn play(session: &mut Session, input: &mut InputReader<impl BufRead>) -> io::Result<AfterGame> {
    enum Command {
        Fire(Coordinate),
        Restart,
        Quit,
        Help,
    }
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:(?:fire|shoot|f)\s+(?:at\s+)?)?(?P<coord>[a-z0-9]+(?:\s*,\s*[0-9]+)?)$")
            .unwrap()
    });

    println!();
    println!("The battle begins! Type help or ? for commands.");
    loop {
        println!();
        println!("Opponent's waters:");
        show_obfuscated_board(session.game());
        println!();
        println!("Your fleet:");
        show_revealed_board(session.game());
        println!();

        let cmd = input.read_input_lower("fire>", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "restart" | "new" => Some(Command::Restart),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => match FIRE.captures(other).and_then(|c| parse_coord(&c["coord"])) {
                Some(coord) => Some(Command::Fire(coord)),
                None => {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            },
        })?;

        match cmd {
            Command::Help => println!(
                "Available Commands:
    fire <row>,<col>    fire at the given cell of the opponent's grid. \"fire\" may be omitted.
    fire <label>        fire at a cell given as row letter and column number, like b7.
    restart             abandon this game and start a new one.
    quit                exit."
            ),
            Command::Restart => return Ok(AfterGame::Restart),
            Command::Quit => return Ok(AfterGame::Quit),
            Command::Fire(coord) => {
                let report = match session.player_attack(coord, Instant::now()) {
                    Ok(report) => report,
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                };
                describe(session.game(), &report);
                if let Some(deadline) = session.next_deadline() {
                    println!("The opponent is taking aim...");
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    match session.poll(Instant::now()) {
                        Ok(Some(report)) => describe(session.game(), &report),
                        Ok(None) => {}
                        Err(err) => println!("The opponent could not fire: {}", err),
                    }
                }
                if let Some(winner) = session.game().winner() {
                    println!();
                    show_revealed_board(session.game());
                    match winner {
                        Side::Player => println!("You sank the whole enemy fleet. You win!"),
                        Side::Opponent => println!("Your fleet has been destroyed. You lose."),
                    }
                    return input.read_input_lower("Play again? (Y/n)", |input| match input {
                        "yes" | "y" | "" => Some(AfterGame::Restart),
                        "no" | "n" => Some(AfterGame::Quit),
                        _ => None,
                    });
                }
            }
        }
    }
}

/// Print a line describing the result of a shot.
fn describe(game: &Game, report: &TurnReport) {
    let who = match report.attacker {
        Side::Player => "You fire",
        Side::Opponent => "The opponent fires",
    };
    let label = CellLabel(report.coord);
    match report.result.outcome {
        Outcome::AlreadyAttacked => println!("{} at {} again. Nothing happens.", who, label),
        Outcome::Miss => println!("{} at {}. Miss.", who, label),
        Outcome::Hit => match &report.result.sunk_ship {
            None => println!("{} at {}. Hit!", who, label),
            Some(ship) => {
                let fleet = match report.attacker {
                    Side::Player => game.opponent_fleet(),
                    Side::Opponent => game.player_fleet(),
                };
                let name = fleet
                    .ship_at(ship.anchor())
                    .and_then(|idx| game.catalog().get(idx))
                    .map_or("ship", |class| class.name());
                println!("{} at {}. Hit! The {} is sunk!", who, label, name);
            }
        },
    }
}

/// Print out the fully-revealed board for the player.
fn show_revealed_board(game: &Game) {
    enum RevealedCell {
        Empty,
        Shot,
        NotShot(ShipAbbreviation),
        Hit(ShipAbbreviation),
        Sunk(ShipAbbreviation),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~~"),
                RevealedCell::Shot => f.pad("x"),
                RevealedCell::NotShot(ship) => fmt::Display::fmt(ship, f),
                RevealedCell::Hit(ship) => f.pad(&format!("x{}", ship.abbrev())),
                RevealedCell::Sunk(ship) => f.pad(&format!("X{}", ship.abbrev())),
            }
        }
    }
    let owner = |coord: Coordinate| {
        (0..game.catalog().len())
            .find(|&idx| game.placement(idx).map_or(false, |ship| ship.occupies(coord)))
    };
    let sunk = |idx: usize| game.player_fleet().get(idx).map_or(false, |ship| ship.is_sunk());
    show_board(game.player_grid().iter_rows().map(move |row| {
        row.map(move |(coord, cell)| match (cell, owner(coord)) {
            (Cell::Miss, _) => RevealedCell::Shot,
            (_, None) => RevealedCell::Empty,
            (Cell::Hit, Some(idx)) if sunk(idx) => RevealedCell::Sunk(ShipAbbreviation(idx)),
            (Cell::Hit, Some(idx)) => RevealedCell::Hit(ShipAbbreviation(idx)),
            (_, Some(idx)) => RevealedCell::NotShot(ShipAbbreviation(idx)),
        })
    }))
}

/// Print out the opponent's board, hiding ships that have not been hit.
fn show_obfuscated_board(game: &Game) {
    enum HiddenCell {
        NotShot,
        Miss,
        Hit,
        Sunk(ShipAbbreviation),
    }
    impl fmt::Display for HiddenCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                HiddenCell::NotShot => f.pad("~~"),
                HiddenCell::Miss => f.pad("x"),
                HiddenCell::Hit => f.pad("**"),
                HiddenCell::Sunk(ship) => f.pad(&format!("X{}", ship.abbrev())),
            }
        }
    }
    let fleet = game.opponent_fleet();
    show_board(game.opponent_grid().iter_rows().map(move |row| {
        row.map(move |(coord, cell)| match cell {
            Cell::Empty | Cell::Ship => HiddenCell::NotShot,
            Cell::Miss => HiddenCell::Miss,
            Cell::Hit => match fleet.ship_at(coord) {
                Some(idx) if fleet.get(idx).map_or(false, |ship| ship.is_sunk()) => {
                    HiddenCell::Sunk(ShipAbbreviation(idx))
                }
                _ => HiddenCell::Hit,
            },
        })
    }))
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items. Rows are labelled with letters and columns with 1-based numbers.
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    for (i, row) in rows.enumerate() {
        let cells: Vec<String> = row.map(|cell| format!("{:^4}", cell)).collect();
        if i == 0 {
            print!("   ");
            for col in 1..=cells.len() {
                print!("{:^4}", col);
            }
            println!();
        }
        println!("{:>2} {}", RowLabel(i), cells.concat());
    }
}

/// Display helper for a row letter.
struct RowLabel(usize);

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 < 26 {
            f.pad(&((b'A' + self.0 as u8) as char).to_string())
        } else {
            f.pad(&self.0.to_string())
        }
    }
}

/// Display helper that prints a cell as its row letter and 1-based column, like `B7`.
struct CellLabel(Coordinate);

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Coordinate { row, col } = self.0;
        if row >= 0 && col >= 0 {
            write!(f, "{}{}", RowLabel(row as usize), col + 1)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Display helper that prints the abbreviation of the ship with the given catalog index.
struct ShipAbbreviation(usize);

impl ShipAbbreviation {
    fn abbrev(&self) -> &'static str {
        match ShipClass::ALL.get(self.0) {
            Some(ShipClass::Carrier) => "cv",
            Some(ShipClass::Battleship) => "bb",
            Some(ShipClass::Cruiser) => "cl",
            Some(ShipClass::Submarine) => "ss",
            Some(ShipClass::Destroyer) => "dd",
            None => "??",
        }
    }
}

impl fmt::Display for ShipAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.abbrev())
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
