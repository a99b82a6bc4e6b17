#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vpc_inspector::{find_free_blocks, Cidr, InspectorError};

#[derive(Arbitrary, Debug)]
struct Plan {
    parent: (u32, u8),
    used: Vec<(u32, u8)>,
}

fn block((addr, prefix): (u32, u8)) -> Cidr {
    Cidr::from_u32(addr, prefix % 33).unwrap()
}

fuzz_target!(|plan: Plan| {
    let parent = block(plan.parent);
    let used: Vec<Cidr> = plan.used.into_iter().take(64).map(block).collect();

    match find_free_blocks(parent, &used) {
        Ok(free) => {
            let retained: Vec<&Cidr> = used.iter().filter(|b| parent.contains(b)).collect();
            let covered: u64 = free.iter().map(Cidr::size).sum::<u64>()
                + retained.iter().map(|b| b.size()).sum::<u64>();
            assert_eq!(covered, parent.size());

            for pair in free.windows(2) {
                assert!(pair[0].last() < pair[1].first());
            }
        }
        Err(InspectorError::Overlap { first, second }) => {
            assert!(first.overlaps(&second));
        }
        Err(other) => panic!("unexpected error: {}", other),
    }
});
