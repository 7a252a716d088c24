use collision_astar::{DynamicBlocks, PathError, Pathfinder, Point};

// The same map searched twice: once as is and once with another agent standing in the
// upper corridor. The agent is given in the packed `x + 256 * y` form.
//  _____
// |S   E|
// | ### |
// |     |
//  _____

fn main() -> Result<(), PathError> {
    env_logger::init();
    let pathfinder = Pathfinder::new("000000111000000", 5, 3)?;
    let start = Point::new(0, 0);
    let end = Point::new(4, 0);

    let free = pathfinder.get_path_from_start(start, end, &DynamicBlocks::new())?;
    println!("Free corridor: {:?}", free);

    let agents = DynamicBlocks::from_legacy_keys([2]);
    match pathfinder.get_path_from_start(start, end, &agents)? {
        Some(path) => println!("Around the agent: {:?}", path),
        None => println!("Agents block every route"),
    }
    Ok(())
}
