use std::ops::Range;

use super::planes::Bucket;

/// How a single triangle has to be cut up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriangleSplit {
    /// The triangle already lies within one slab.
    NoSplit,
    /// Exactly one plane passes through the interior of the triangle. The
    /// apex is alone on its side of the plane, `others` follow it in the
    /// winding order of the face.
    SinglePlane {
        apex: u32,
        others: [u32; 2],
        plane: usize,
    },
    /// Two or more planes pass through the triangle. `isolated` is the
    /// vertex with the lowest bucket, `others` follow it in winding order and
    /// `planes` are the indices of every crossed plane, lowest first.
    MultiPlane {
        isolated: u32,
        others: [u32; 2],
        case: LadderCase,
        planes: Range<usize>,
    },
}

/// Shape of the ladder of trapezoids built for a [`TriangleSplit::MultiPlane`]
/// triangle. Slab membership is decided on truncated buckets, so a vertex
/// exactly on a plane belongs to the slab above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderCase {
    /// `others[0]` shares the lowest slab with the isolated vertex. The rails
    /// run up both edges into `others[1]`, which caps the ladder.
    LowPairNext,
    /// `others[1]` shares the lowest slab with the isolated vertex. The rails
    /// run up both edges into `others[0]`, which caps the ladder.
    LowPairPrev,
    /// The isolated vertex is alone in the lowest slab and the rails start
    /// from it along both of its edges.
    LoneLow,
}

/// Number of plane boundaries spanned by a triangle with the given vertex
/// buckets. Zero or one means there is nothing to cut.
pub fn crossing_count(buckets: [Bucket; 3]) -> usize {
    let (min, max) = min_max(buckets);
    max.ceil() - min.floor()
}

/// Picks the kind of split needed for `face`, whose vertices have the given
/// buckets.
pub fn classify(face: [u32; 3], buckets: [Bucket; 3]) -> TriangleSplit {
    let (min, max) = min_max(buckets);
    let crossings = max.ceil() - min.floor();

    match crossings {
        0 | 1 => TriangleSplit::NoSplit,
        2 => {
            let plane = min.floor() + 1;
            let below = buckets.map(|b| b.truncated() < plane);
            let below_count = below.iter().filter(|&&x| x).count();
            let lone_side = below_count == 1;
            let apex = corner(below.iter().position(|&x| x == lone_side));

            TriangleSplit::SinglePlane {
                apex: face[apex],
                others: [face[(apex + 1) % 3], face[(apex + 2) % 3]],
                plane,
            }
        }
        _ => {
            let first = corner(buckets.iter().position(|&b| b == min));
            let lowest = min.truncated();
            let next = buckets[(first + 1) % 3].truncated() == lowest;
            let prev = buckets[(first + 2) % 3].truncated() == lowest;

            let case = match (next, prev) {
                (true, false) => LadderCase::LowPairNext,
                (false, true) => LadderCase::LowPairPrev,
                (false, false) => LadderCase::LoneLow,
                (true, true) => unreachable!("triangle within one slab has {crossings} crossings"),
            };

            TriangleSplit::MultiPlane {
                isolated: face[first],
                others: [face[(first + 1) % 3], face[(first + 2) % 3]],
                case,
                planes: min.floor() + 1..max.ceil(),
            }
        }
    }
}

fn min_max(buckets: [Bucket; 3]) -> (Bucket, Bucket) {
    let min = buckets[0].min(buckets[1]).min(buckets[2]);
    let max = buckets[0].max(buckets[1]).max(buckets[2]);
    (min, max)
}

fn corner(position: Option<usize>) -> usize {
    position.expect("no corner matches the split classification")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACE: [u32; 3] = [10, 11, 12];

    fn on(i: usize) -> Bucket {
        Bucket::on_plane(i)
    }

    fn between(i: usize) -> Bucket {
        Bucket::between(i)
    }

    #[test]
    fn crossing_counts() {
        assert_eq!(crossing_count([on(1), on(1), on(1)]), 0);
        assert_eq!(crossing_count([between(1), between(1), between(1)]), 1);
        assert_eq!(crossing_count([on(1), between(1), on(2)]), 1);
        assert_eq!(crossing_count([between(0), between(1), between(0)]), 2);
        assert_eq!(crossing_count([on(0), on(0), on(3)]), 3);
        assert_eq!(crossing_count([between(0), on(2), between(3)]), 4);
    }

    #[test]
    fn single_slab_is_not_split() {
        assert_eq!(
            classify(FACE, [between(2), on(2), on(3)]),
            TriangleSplit::NoSplit
        );
        assert_eq!(
            classify(FACE, [on(1), on(1), on(1)]),
            TriangleSplit::NoSplit
        );
    }

    #[test]
    fn single_plane_apex_below() {
        assert_eq!(
            classify(FACE, [between(1), between(0), between(1)]),
            TriangleSplit::SinglePlane {
                apex: 11,
                others: [12, 10],
                plane: 1,
            }
        );
    }

    #[test]
    fn single_plane_apex_above() {
        assert_eq!(
            classify(FACE, [on(0), on(0), on(2)]),
            TriangleSplit::SinglePlane {
                apex: 12,
                others: [10, 11],
                plane: 1,
            }
        );
    }

    #[test]
    fn single_plane_vertex_on_plane_counts_as_above() {
        // Vertex 11 touches plane 2 and sits with the upper vertex.
        assert_eq!(
            classify(FACE, [between(1), on(2), between(2)]),
            TriangleSplit::SinglePlane {
                apex: 10,
                others: [11, 12],
                plane: 2,
            }
        );
    }

    #[test]
    fn multi_plane_cases() {
        assert_eq!(
            classify(FACE, [on(0), on(0), on(3)]),
            TriangleSplit::MultiPlane {
                isolated: 10,
                others: [11, 12],
                case: LadderCase::LowPairNext,
                planes: 1..3,
            }
        );
        assert_eq!(
            classify(FACE, [between(0), on(4), on(0)]),
            TriangleSplit::MultiPlane {
                isolated: 12,
                others: [10, 11],
                case: LadderCase::LowPairNext,
                planes: 1..4,
            }
        );
        assert_eq!(
            classify(FACE, [on(0), on(3), between(0)]),
            TriangleSplit::MultiPlane {
                isolated: 10,
                others: [11, 12],
                case: LadderCase::LowPairPrev,
                planes: 1..3,
            }
        );
        assert_eq!(
            classify(FACE, [between(2), between(0), on(4)]),
            TriangleSplit::MultiPlane {
                isolated: 11,
                others: [12, 10],
                case: LadderCase::LoneLow,
                planes: 1..4,
            }
        );
    }

    #[test]
    fn lowest_slab_uses_truncated_buckets() {
        // 10 is on plane 1, 11 is just above it: both are in slab 1.
        assert_eq!(
            classify(FACE, [on(1), between(1), between(3)]),
            TriangleSplit::MultiPlane {
                isolated: 10,
                others: [11, 12],
                case: LadderCase::LowPairNext,
                planes: 2..4,
            }
        );
    }
}
