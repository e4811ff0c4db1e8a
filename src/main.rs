use clap::{arg,crate_version,Command};
use boardpack::{board, frame, games, net, sim};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();

    let long_help =
"Examples:
---------
Simulate:      `boardpack simulate -g 1000 -o boards.raw`
Compress:      `boardpack compress -i boards.raw -o boards.bpk`
Expand:        `boardpack expand -i boards.bpk -o boards.raw`
Send:          `boardpack send -i boards.raw -a 127.0.0.1 -p 9000`
Receive:       `boardpack receive -o boards.raw -a 0.0.0.0 -p 9000`

Raw board files hold 9 bytes per board, one byte per square in row-major
order: 0 = empty, 1 = X, 2 = O.";

    let mut main_cmd = Command::new("boardpack")
        .about("Compress and migrate tic-tac-toe board streams")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("simulate")
        .arg(arg!(-g --games <COUNT> "number of games to play").required(true))
        .arg(arg!(-e --epsilon <PROB> "random move probability, default 0.2").required(false))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("generate self-play games as a raw board file"));
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("compress a raw board file into a frame"));
    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("expand a frame back into a raw board file"));
    main_cmd = main_cmd.subcommand(Command::new("send")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-a --address <HOST> "peer address").required(true))
        .arg(arg!(-p --port <PORT> "peer port").required(true))
        .about("compress a raw board file and send it to a peer"));
    main_cmd = main_cmd.subcommand(Command::new("receive")
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .arg(arg!(-a --address <HOST> "listen address").required(true))
        .arg(arg!(-p --port <PORT> "listen port").required(true))
        .about("receive a frame and write it as a raw board file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("simulate") {
        let count = cmd.get_one::<String>("games").expect(RCH).parse::<usize>()?;
        let epsilon = match cmd.get_one::<String>("epsilon") {
            Some(s) => s.parse::<f64>()?,
            None => 0.2
        };
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let game_list = sim::simulate_games(count,epsilon);
        let boards = games::boards_from_games(&game_list);
        log::info!("simulated {} games, {} boards",game_list.len(),boards.len());
        std::fs::write(path_out,board::boards_to_raw(&boards))?;
    }

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let boards = board::raw_to_boards(&std::fs::read(path_in)?)?;
        let buf = frame::encode_frame(&boards)?;
        log::info!("compressed {} boards into {} bytes",boards.len(),buf.len());
        std::fs::write(path_out,buf)?;
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let boards = frame::decode_frame(&std::fs::read(path_in)?)?;
        log::info!("expanded {} boards",boards.len());
        std::fs::write(path_out,board::boards_to_raw(&boards))?;
    }

    if let Some(cmd) = matches.subcommand_matches("send") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let address = cmd.get_one::<String>("address").expect(RCH);
        let port = cmd.get_one::<String>("port").expect(RCH).parse::<u16>()?;
        let boards = board::raw_to_boards(&std::fs::read(path_in)?)?;
        net::stream_out_boards(&boards,address,port)?;
    }

    if let Some(cmd) = matches.subcommand_matches("receive") {
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let address = cmd.get_one::<String>("address").expect(RCH);
        let port = cmd.get_one::<String>("port").expect(RCH).parse::<u16>()?;
        let boards = net::stream_in_boards(address,port)?;
        std::fs::write(path_out,board::boards_to_raw(&boards))?;
    }

    Ok(())
}
