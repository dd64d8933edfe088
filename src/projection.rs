//! Gnomonic projection between a face-local plane and the sphere.
//!
//! Each icosahedron face projects through a plane tangent at its
//! center. The face tables give the center of each face (as spherical
//! coordinates and as a unit-sphere point) and the azimuth from the
//! center to each of its three vertices in the Class II orientation;
//! the i-axis azimuth (index 0) anchors the planar angle.

use crate::constants::{
  EPSILON, M_AP7_ROT_RADS, M_ONETHIRD, M_RSQRT7, M_SQRT7, NUM_ICOSA_FACES, RES0_U_GNOMONIC,
};
use crate::geo::{az_distance_rads, azimuth_rads, pos_angle_rads};
use crate::index::is_class_iii;
use crate::types::{CoordIjk, FaceIjk, LatLng, Vec2d, Vec3d};

/// Icosahedron face centers in spherical coordinates.
#[rustfmt::skip]
pub(crate) const FACE_CENTER_GEO: [LatLng; NUM_ICOSA_FACES as usize] = [
  LatLng { lat: 0.803_582_649_718_989_94, lng: 1.248_397_419_617_396 },     // face 0
  LatLng { lat: 1.307_747_883_455_638_2, lng: 2.536_945_009_877_921 },      // face 1
  LatLng { lat: 1.054_751_253_523_952, lng: -1.347_517_358_900_396_6 },     // face 2
  LatLng { lat: 0.600_191_595_538_186_8, lng: -0.450_603_909_469_755_75 },  // face 3
  LatLng { lat: 0.491_715_428_198_773_87, lng: 0.401_988_202_911_306_94 },  // face 4
  LatLng { lat: 0.172_745_327_415_618_7, lng: 1.678_146_885_280_433_7 },    // face 5
  LatLng { lat: 0.605_929_321_571_350_7, lng: 2.953_923_329_812_411_6 },    // face 6
  LatLng { lat: 0.427_370_518_328_979_64, lng: -1.888_876_200_336_285_4 },  // face 7
  LatLng { lat: -0.079_066_118_549_212_83, lng: -0.733_429_513_380_867_74 },// face 8
  LatLng { lat: -0.230_961_644_455_383_64, lng: 0.506_495_587_332_349 },    // face 9
  LatLng { lat: 0.079_066_118_549_212_83, lng: 2.408_163_140_208_925_5 },   // face 10
  LatLng { lat: 0.230_961_644_455_383_64, lng: -2.635_097_066_257_444 },    // face 11
  LatLng { lat: -0.172_745_327_415_618_7, lng: -1.463_445_768_309_359_5 },  // face 12
  LatLng { lat: -0.605_929_321_571_350_7, lng: -0.187_669_323_777_381_62 }, // face 13
  LatLng { lat: -0.427_370_518_328_979_64, lng: 1.252_716_453_253_508 },    // face 14
  LatLng { lat: -0.600_191_595_538_186_8, lng: 2.690_988_744_120_037_5 },   // face 15
  LatLng { lat: -0.491_715_428_198_773_87, lng: -2.739_604_450_678_486_3 }, // face 16
  LatLng { lat: -0.803_582_649_718_989_94, lng: -1.893_195_233_972_397 },   // face 17
  LatLng { lat: -1.307_747_883_455_638_2, lng: -0.604_647_643_711_872_1 },  // face 18
  LatLng { lat: -1.054_751_253_523_952, lng: 1.794_075_294_689_396_6 },     // face 19
];

/// Icosahedron face centers as unit-sphere points.
#[rustfmt::skip]
const FACE_CENTER_POINT: [Vec3d; NUM_ICOSA_FACES as usize] = [
  Vec3d { x: 0.219_930_779_140_460_6, y: 0.658_369_178_027_499_6, z: 0.719_847_537_892_618_2 },     // face 0
  Vec3d { x: -0.213_923_483_450_142_1, y: 0.147_817_182_955_070_3, z: 0.965_601_793_521_420_5 },    // face 1
  Vec3d { x: 0.109_262_527_878_479_7, y: -0.481_195_157_287_321, z: 0.869_777_512_128_725_3 },      // face 2
  Vec3d { x: 0.742_856_730_158_679_1, y: -0.359_394_167_827_802_8, z: 0.564_800_593_651_703_3 },    // face 3
  Vec3d { x: 0.811_253_470_914_096_9, y: 0.344_895_323_763_938_4, z: 0.472_138_773_641_393 },       // face 4
  Vec3d { x: -0.105_549_814_961_392_1, y: 0.979_445_729_641_141_3, z: 0.171_887_461_000_936_5 },    // face 5
  Vec3d { x: -0.807_540_757_997_009_2, y: 0.153_355_248_589_881_8, z: 0.569_526_199_488_268_8 },    // face 6
  Vec3d { x: -0.284_614_806_978_790_7, y: -0.864_408_097_265_420_6, z: 0.414_479_255_247_354 },     // face 7
  Vec3d { x: 0.740_562_147_385_448_2, y: -0.667_329_956_456_552_4, z: -0.078_983_764_632_673_77 },  // face 8
  Vec3d { x: 0.851_230_398_647_429_3, y: 0.472_234_378_858_268_1, z: -0.228_913_738_868_780_8 },    // face 9
  Vec3d { x: -0.740_562_147_385_448_1, y: 0.667_329_956_456_552_4, z: 0.078_983_764_632_673_77 },   // face 10
  Vec3d { x: -0.851_230_398_647_429_2, y: -0.472_234_378_858_268_2, z: 0.228_913_738_868_780_8 },   // face 11
  Vec3d { x: 0.105_549_814_961_391_9, y: -0.979_445_729_641_141_3, z: -0.171_887_461_000_936_5 },   // face 12
  Vec3d { x: 0.807_540_757_997_009_2, y: -0.153_355_248_589_881_9, z: -0.569_526_199_488_268_8 },   // face 13
  Vec3d { x: 0.284_614_806_978_790_8, y: 0.864_408_097_265_420_4, z: -0.414_479_255_247_354 },      // face 14
  Vec3d { x: -0.742_856_730_158_679_1, y: 0.359_394_167_827_802_7, z: -0.564_800_593_651_703_3 },   // face 15
  Vec3d { x: -0.811_253_470_914_097_1, y: -0.344_895_323_763_938_2, z: -0.472_138_773_641_393 },    // face 16
  Vec3d { x: -0.219_930_779_140_460_7, y: -0.658_369_178_027_499_6, z: -0.719_847_537_892_618_2 },  // face 17
  Vec3d { x: 0.213_923_483_450_142, y: -0.147_817_182_955_070_4, z: -0.965_601_793_521_420_5 },     // face 18
  Vec3d { x: -0.109_262_527_878_479_6, y: 0.481_195_157_287_321, z: -0.869_777_512_128_725_3 },     // face 19
];

/// Azimuth from each face center to its vertices 0, 1 and 2, Class II
/// orientation. Index 0 is the i-axis azimuth.
#[rustfmt::skip]
const FACE_AXES_AZ_RADS_CII: [[f64; 3]; NUM_ICOSA_FACES as usize] = [
  [5.619_958_268_523_94, 3.525_563_166_130_744_5, 1.431_168_063_737_548_7],   // face 0
  [5.760_339_081_714_187, 3.665_943_979_320_991_7, 1.571_548_876_927_796],    // face 1
  [0.780_213_654_393_430_1, 4.969_003_859_179_821, 2.874_608_756_786_625_7],  // face 2
  [0.430_469_363_979_999_9, 4.619_259_568_766_391, 2.524_864_466_373_195_5],  // face 3
  [6.130_269_123_335_111, 4.035_874_020_941_916, 1.941_478_918_548_720_3],    // face 4
  [2.692_877_706_530_643, 0.598_482_604_137_447_1, 4.787_272_808_923_838],    // face 5
  [2.982_963_003_477_244, 0.888_567_901_084_048_4, 5.077_358_105_870_44],     // face 6
  [3.532_912_002_790_141, 1.438_516_900_396_945_7, 5.627_307_105_183_337],    // face 7
  [3.494_305_004_259_568, 1.399_909_901_866_372_9, 5.588_700_106_652_764],    // face 8
  [3.003_214_169_499_538_4, 0.908_819_067_106_342_9, 5.097_609_271_892_734],  // face 9
  [5.930_472_956_509_811_6, 3.836_077_854_116_616, 1.741_682_751_723_420_4],  // face 10
  [0.138_378_484_090_254_85, 4.327_168_688_876_646, 2.232_773_586_483_45],    // face 11
  [0.448_714_947_059_150_36, 4.637_505_151_845_541_5, 2.543_110_049_452_346], // face 12
  [0.158_629_650_112_549_36, 4.347_419_854_898_94, 2.253_024_752_505_745],    // face 13
  [5.891_865_957_979_238_5, 3.797_470_855_586_043, 1.703_075_753_192_847_6],  // face 14
  [2.711_123_289_609_793_3, 0.616_728_187_216_597_8, 4.805_518_392_002_988_7],// face 15
  [3.294_508_837_434_268, 1.200_113_735_041_073, 5.388_903_939_827_464],      // face 16
  [3.804_819_692_245_44, 1.710_424_589_852_244_5, 5.899_214_794_638_635],     // face 17
  [3.664_438_879_055_192_4, 1.570_043_776_661_997, 5.758_833_981_448_388],    // face 18
  [2.361_378_999_196_363, 0.266_983_896_803_167_6, 4.455_774_101_589_558_6],  // face 19
];

/// The face whose center is closest to `g`, with the squared chord
/// distance from `g` to that center.
#[must_use]
pub(crate) fn closest_face(g: LatLng) -> (i32, f64) {
  let p = Vec3d::from_geo(g);

  // Squared chord distance on the unit sphere is at most 4.
  let mut face = 0;
  let mut sqd = 5.0;
  for (f, center) in FACE_CENTER_POINT.iter().enumerate() {
    let d = center.square_dist(p);
    if d < sqd {
      face = f as i32;
      sqd = d;
    }
  }
  (face, sqd)
}

/// Inverse projection: the face containing `g` and the face-plane
/// position of `g` scaled for resolution `res`.
#[must_use]
pub(crate) fn geo_to_hex2d(g: LatLng, res: i32) -> (i32, Vec2d) {
  let (face, sqd) = closest_face(g);

  // cos(r) = 1 - 2 sin^2(r/2) = 1 - sqd/2
  let r = (1.0 - sqd / 2.0).clamp(-1.0, 1.0).acos();
  if r < EPSILON {
    return (face, Vec2d::new(0.0, 0.0));
  }

  // angle from the face's i-axis, CCW in the face plane
  let az = azimuth_rads(FACE_CENTER_GEO[face as usize], g);
  let mut theta = pos_angle_rads(FACE_AXES_AZ_RADS_CII[face as usize][0] - pos_angle_rads(az));

  if is_class_iii(res) {
    theta = pos_angle_rads(theta - M_AP7_ROT_RADS);
  }

  // gnomonic scaling, then resolution scaling
  let mut r = r.tan() / RES0_U_GNOMONIC;
  for _ in 0..res {
    r *= M_SQRT7;
  }

  (face, Vec2d::new(r * theta.cos(), r * theta.sin()))
}

/// Forward projection: the spherical coordinates under a face-plane
/// position at resolution `res`. `substrate` marks coordinates on the
/// ×3 substrate grid used for cell vertices.
#[must_use]
pub(crate) fn hex2d_to_geo(v: Vec2d, face: i32, res: i32, substrate: bool) -> LatLng {
  let mut r = v.mag();
  if r < EPSILON {
    return FACE_CENTER_GEO[face as usize];
  }

  let mut theta = v.y.atan2(v.x);

  // undo the resolution scaling
  for _ in 0..res {
    r *= M_RSQRT7;
  }

  if substrate {
    r *= M_ONETHIRD;
    if is_class_iii(res) {
      // substrate vertices were generated on the next finer Class II grid
      r *= M_RSQRT7;
    }
  }

  // inverse gnomonic scaling
  r = (r * RES0_U_GNOMONIC).atan();

  // substrate coordinates are already axis-aligned to Class II
  if !substrate && is_class_iii(res) {
    theta = pos_angle_rads(theta + M_AP7_ROT_RADS);
  }

  let az = pos_angle_rads(FACE_AXES_AZ_RADS_CII[face as usize][0] - theta);
  az_distance_rads(FACE_CENTER_GEO[face as usize], az, r)
}

/// Project `g` to its containing face and quantize to the lattice cell
/// at resolution `res`.
#[inline]
#[must_use]
pub(crate) fn geo_to_face_ijk(g: LatLng, res: i32) -> FaceIjk {
  let (face, v) = geo_to_hex2d(g, res);
  FaceIjk::new(face, CoordIjk::from_hex2d(v))
}

/// The spherical coordinates of a lattice cell center.
#[inline]
#[must_use]
pub(crate) fn face_ijk_to_geo(h: FaceIjk, res: i32) -> LatLng {
  hex2d_to_geo(h.coord.to_hex2d(), h.face, res, false)
}
